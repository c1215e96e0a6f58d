use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::prelude::*;
use std::fs;
use std::path::Path;

mod m20261012_000001_create_banner;
mod m20261012_000002_create_message;
mod m20261012_000003_create_phone_verification;
mod m20261012_000004_create_rating;
mod m20261012_000005_create_subscription;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261012_000001_create_banner::Migration),
            Box::new(m20261012_000002_create_message::Migration),
            Box::new(m20261012_000003_create_phone_verification::Migration),
            Box::new(m20261012_000004_create_rating::Migration),
            Box::new(m20261012_000005_create_subscription::Migration),
        ]
    }
}

/// 连接数据库，SQLite 文件不存在时先创建
pub async fn connect(database_url: &str) -> anyhow::Result<DatabaseConnection> {
    if let Some(file) = sqlite_file_path(database_url) {
        let path = Path::new(file);
        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("无法创建数据目录: {}", parent.display()))?;
                }
            }
            fs::write(path, "")
                .with_context(|| format!("无法创建数据库文件: {}", path.display()))?;
        }
    }

    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);
    if database_url.contains(":memory:") {
        // 内存库只存在于单个连接上
        options.max_connections(1).min_connections(1);
    }

    Database::connect(options)
        .await
        .with_context(|| format!("无法连接数据库: {}", database_url))
}

/// 从 `sqlite://path?query` 中取出文件路径，内存库返回 None
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url.strip_prefix("sqlite://")?;
    let file = rest.split('?').next().unwrap_or(rest);
    if file.is_empty() || file.contains(":memory:") {
        return None;
    }
    Some(file)
}

/// 测试用内存数据库，已执行全部迁移
#[cfg(test)]
pub async fn test_connection() -> DatabaseConnection {
    let db = connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(sqlite_file_path("sqlite://data/bizdir.db"), Some("data/bizdir.db"));
        assert_eq!(sqlite_file_path("sqlite://data/bizdir.db?mode=rwc"), Some("data/bizdir.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/bizdir"), None);
    }

    #[tokio::test]
    async fn test_migrations_up_down() {
        let db = test_connection().await;
        let manager = SchemaManager::new(&db);
        for table in ["banner", "message", "phone_verification", "rating", "subscription"] {
            assert!(manager.has_table(table).await.unwrap(), "missing table {}", table);
        }

        Migrator::down(&db, None).await.unwrap();
        assert!(!manager.has_table("rating").await.unwrap());
    }

    #[tokio::test]
    async fn test_optional_columns_accept_null() {
        use crate::ids::{BusinessId, UserId};
        use crate::schema::{NewBanner, NewMessage, NewPhoneVerification, NewRating, NewSubscription};
        use sea_orm::ActiveModelTrait;

        let db = test_connection().await;
        let now = chrono::Utc::now().naive_utc();

        let banner = NewBanner {
            title: "Banner".into(),
            image_url: "https://cdn.example/b.png".into(),
            target_url: None,
            business_id: None,
            cost_price: None,
            is_active: None,
        };
        let banner = banner.validate().unwrap().insert(&db).await.unwrap();
        assert_eq!(banner.target_url, None);
        assert_eq!(banner.business_id, None);

        let message = NewMessage {
            business_id: Some(BusinessId(1)),
            user_id: None,
            sender_email: "guest@mail.example".into(),
            sender_name: "Guest".into(),
            sender_phone: None,
            subject: None,
            body: "Hello".into(),
        };
        let message = message.validate().unwrap().insert(&db).await.unwrap();
        assert_eq!(message.read_at, None);
        assert_eq!(message.reply_message, None);

        let verification = NewPhoneVerification {
            phone_number: "0712345678".into(),
            business_id: None,
            user_id: None,
        };
        let verification = verification
            .validate("123456".into(), now, chrono::Duration::minutes(10))
            .unwrap()
            .insert(&db)
            .await
            .unwrap();
        assert_eq!(verification.user_id, None);

        let rating = NewRating {
            business_id: Some(BusinessId(1)),
            user_id: Some(UserId(2)),
            rating: Some(4),
            comment: None,
        };
        let rating = rating.validate().unwrap().insert(&db).await.unwrap();
        assert_eq!(rating.comment, None);

        let subscription = NewSubscription {
            business_id: Some(BusinessId(1)),
            tier: None,
            status: None,
            current_period_start: None,
            current_period_end: Some(now + chrono::Duration::days(30)),
            amount: Some(0.0),
            currency: None,
            gateway_customer_id: None,
            gateway_subscription_id: None,
        };
        let subscription = subscription.validate().unwrap().insert(&db).await.unwrap();
        assert_eq!(subscription.gateway_customer_id, None);
        assert_eq!(subscription.gateway_subscription_id, None);
    }
}
