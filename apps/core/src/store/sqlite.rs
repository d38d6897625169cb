//! SQLite-backed implementation of the store collaborators.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::types::Json;
use std::str::FromStr;
use tracing::info;

use crate::error::AppError;
use crate::models::{
    ConversationRecord, IntentCount, IntentDefinition, Sentiment, SentimentCount,
};

use super::traits::{
    ConversationWriter, HistoryReader, IntentTableReader, KeywordLookup, ResponsesByIntent,
};

/// Open the pool and apply the schema.
pub async fn init_db(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    info!("Initializing database at: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS intents (
            intent_name TEXT PRIMARY KEY,
            patterns JSON NOT NULL,
            responses JSON NOT NULL
        );
        CREATE TABLE IF NOT EXISTS knowledge_base (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            keyword TEXT NOT NULL,
            response TEXT NOT NULL,
            confidence REAL NOT NULL DEFAULT 0.0
        );
        CREATE TABLE IF NOT EXISTS conversations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            user_message TEXT NOT NULL,
            bot_response TEXT NOT NULL,
            session_id TEXT NOT NULL,
            sentiment TEXT,
            intent TEXT,
            timestamp DATETIME NOT NULL
        );
        "#,
    )
    .execute(&pool)
    .await?;

    info!("Database initialized and migrations applied.");

    Ok(pool)
}

/// Store handle shared across the engine collaborators and the transport.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert or replace one intent definition.
    pub async fn upsert_intent(&self, definition: &IntentDefinition) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO intents (intent_name, patterns, responses)
            VALUES (?, ?, ?)
            ON CONFLICT(intent_name) DO UPDATE
            SET patterns = excluded.patterns, responses = excluded.responses
            "#,
        )
        .bind(&definition.intent_name)
        .bind(&definition.patterns)
        .bind(&definition.responses)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert one keyword-to-response knowledge entry.
    pub async fn add_knowledge(
        &self,
        keyword: &str,
        response: &str,
        confidence: f64,
    ) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO knowledge_base (keyword, response, confidence)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(keyword)
        .bind(response)
        .bind(confidence)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Seed the built-in Japanese intents when the table is empty.
    /// Idempotent: a populated table is left untouched.
    pub async fn seed_default_intents(&self) -> Result<(), AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM intents")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        info!("Seeding default intents");
        for definition in default_intents() {
            self.upsert_intent(&definition).await?;
        }
        Ok(())
    }

    /// Per-sentiment turn counts for a user.
    pub async fn sentiment_breakdown(&self, user_id: &str) -> Result<Vec<SentimentCount>, AppError> {
        let rows = sqlx::query_as::<_, SentimentCount>(
            r#"
            SELECT sentiment, COUNT(*) as count
            FROM conversations
            WHERE user_id = ? AND sentiment IS NOT NULL
            GROUP BY sentiment
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Most frequent intents for a user, top five.
    pub async fn top_intents(&self, user_id: &str) -> Result<Vec<IntentCount>, AppError> {
        let rows = sqlx::query_as::<_, IntentCount>(
            r#"
            SELECT intent, COUNT(*) as count
            FROM conversations
            WHERE user_id = ? AND intent IS NOT NULL
            GROUP BY intent
            ORDER BY count DESC
            LIMIT 5
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl IntentTableReader for SqliteStore {
    async fn fetch_all(&self) -> Result<Vec<IntentDefinition>, AppError> {
        let rows = sqlx::query_as::<_, IntentDefinition>(
            "SELECT intent_name, patterns, responses FROM intents",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl ResponsesByIntent for SqliteStore {
    async fn fetch_responses(&self, intent_name: &str) -> Result<Vec<String>, AppError> {
        let responses = sqlx::query_scalar::<_, Json<Vec<String>>>(
            "SELECT responses FROM intents WHERE intent_name = ?",
        )
        .bind(intent_name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(responses.map(|Json(variants)| variants).unwrap_or_default())
    }
}

#[async_trait]
impl KeywordLookup for SqliteStore {
    async fn fetch_by_keyword(&self, keyword: &str) -> Result<Option<String>, AppError> {
        let response = sqlx::query_scalar::<_, String>(
            r#"
            SELECT response FROM knowledge_base
            WHERE keyword LIKE ?
            ORDER BY confidence DESC
            LIMIT 1
            "#,
        )
        .bind(format!("%{}%", keyword))
        .fetch_optional(&self.pool)
        .await?;
        Ok(response)
    }
}

#[async_trait]
impl HistoryReader for SqliteStore {
    async fn fetch_recent(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ConversationRecord>, AppError> {
        let rows = sqlx::query_as::<_, ConversationRecord>(
            r#"
            SELECT user_message, bot_response, timestamp, sentiment, intent
            FROM conversations
            WHERE user_id = ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl ConversationWriter for SqliteStore {
    async fn save(
        &self,
        user_id: &str,
        user_message: &str,
        bot_response: &str,
        session_id: &str,
        sentiment: Sentiment,
        intent: &str,
    ) -> Result<i64, AppError> {
        let timestamp = Utc::now().timestamp();

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO conversations
                (user_id, user_message, bot_response, session_id, sentiment, intent, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(user_message)
        .bind(bot_response)
        .bind(session_id)
        .bind(sentiment)
        .bind(intent)
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}

/// Built-in intent table used when the store starts empty.
fn default_intents() -> Vec<IntentDefinition> {
    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    vec![
        IntentDefinition::new(
            "greeting",
            strings(&["こんにちは", "おはよう", "こんばんは", "はじめまして"]),
            strings(&[
                "こんにちは！今日はどんな一日でしたか？",
                "こんにちは！お話しできて嬉しいです。",
                "こんにちは！何かお手伝いできることはありますか？",
            ]),
        ),
        IntentDefinition::new(
            "goodbye",
            strings(&["さようなら", "バイバイ", "またね"]),
            strings(&[
                "さようなら！またお話ししましょうね。",
                "バイバイ！良い一日をお過ごしください。",
            ]),
        ),
        IntentDefinition::new(
            "thanks",
            strings(&["ありがとう", "サンキュー", "感謝"]),
            strings(&[
                "どういたしまして！",
                "こちらこそありがとうございます！",
                "お役に立てて嬉しいです。",
            ]),
        ),
        IntentDefinition::new(
            "food",
            strings(&["好きな食べ物", "食べ物", "料理"]),
            strings(&[
                "私はデータが大好物です！あなたの好きな食べ物は何ですか？",
                "美味しいものの話は楽しいですね。最近何か食べましたか？",
            ]),
        ),
        IntentDefinition::new(
            "name",
            strings(&["名前", "あなたは誰", "ボット"]),
            strings(&[
                "私はカイワ、おしゃべり好きなボットです！",
                "カイワと申します。よろしくお願いします！",
            ]),
        ),
        IntentDefinition::new(
            "weather",
            strings(&["天気", "晴れ", "雨"]),
            strings(&[
                "窓の外は見えないのですが、天気の話は好きです！今日はどんな空ですか？",
                "天気によって気分も変わりますよね。",
            ]),
        ),
        IntentDefinition::new(
            "time",
            strings(&["時間", "今何時", "時刻"]),
            strings(&[
                "お手元の時計を見てみてください！私の時計はいつも動いていますよ。",
                "時間が経つのは早いですね。",
            ]),
        ),
    ]
}
