//! # MongoDB Connection Module
//!
//! 사용자 데이터를 저장하는 MongoDB 연결을 관리합니다.
//! `Database`는 `ServiceLocator::set()`으로 등록되어 모든 리포지토리에 주입됩니다.
//!
//! ## 환경 변수
//!
//! - `MONGODB_URI`: 연결 문자열 (기본값 `mongodb://localhost:27017`)
//! - `DATABASE_NAME`: 데이터베이스 이름 (기본값 `chat_user_dev`)

use mongodb::{Client, options::ClientOptions};
use log::info;
use crate::config::DatabaseConfig;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 연결을 생성하고 `ping` 명령으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mongodb_uri = DatabaseConfig::mongodb_uri();
        let database_name = DatabaseConfig::database_name();

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("chat_user_service".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
