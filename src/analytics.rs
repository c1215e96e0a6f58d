//! 广告位点击/曝光计数

use std::fmt;
use std::str::FromStr;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, TransactionTrait,
};
use serde::Serialize;

use crate::entity::{banner, Banner};
use crate::error::{AppError, AppResult};

/// 统计事件类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Impression,
}

impl EventKind {
    /// 事件对应的计数列
    pub fn counter(self) -> banner::Column {
        match self {
            EventKind::Click => banner::Column::ClickCount,
            EventKind::Impression => banner::Column::ImpressionCount,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Impression => "impression",
        }
    }

    /// 解析请求中的 `type` 字段，缺失或取值不在 {click, impression} 中均为校验错误
    pub fn parse(token: Option<&str>) -> AppResult<Self> {
        match token {
            None => Err(AppError::validation(
                "type is required and must be 'click' or 'impression'",
            )),
            Some(token) => token.parse(),
        }
    }
}

impl FromStr for EventKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "click" => Ok(EventKind::Click),
            "impression" => Ok(EventKind::Impression),
            other => Err(AppError::validation(format!(
                "invalid type '{}', expected 'click' or 'impression'",
                other
            ))),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次计数的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCount {
    pub kind: EventKind,
    pub count: i64,
}

/// 对指定广告位的计数列原子 +1，并返回本次更新后的值
///
/// 自增是单条 `UPDATE ... SET col = col + 1`，与回读放在同一事务中，
/// 并发调用不会丢失计数。
pub async fn record_event<C>(db: &C, banner_id: i64, kind: EventKind) -> AppResult<EventCount>
where
    C: ConnectionTrait + TransactionTrait,
{
    let column = kind.counter();
    let txn = db.begin().await?;

    let result = Banner::update_many()
        .col_expr(column, Expr::col(column).add(1))
        .filter(banner::Column::Id.eq(banner_id))
        .exec(&txn)
        .await?;

    if result.rows_affected == 0 {
        txn.rollback().await?;
        return Err(AppError::not_found(format!("banner {} not found", banner_id)));
    }

    let count = Banner::find_by_id(banner_id)
        .select_only()
        .column(column)
        .into_tuple::<i64>()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::not_found(format!("banner {} not found", banner_id)))?;

    txn.commit().await?;

    tracing::debug!("广告位 #{} {} 计数 -> {}", banner_id, kind, count);
    Ok(EventCount { kind, count })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ids::BusinessId;
    use crate::migration::test_connection;
    use crate::schema::NewBanner;
    use sea_orm::{ActiveModelTrait, DatabaseConnection, IdenStatic};

    pub(crate) async fn insert_banner(db: &DatabaseConnection, cost_price: f64, is_active: bool) -> banner::Model {
        NewBanner {
            title: "Spring sale".into(),
            image_url: "https://cdn.example/spring.png".into(),
            target_url: Some("https://shop.example".into()),
            business_id: Some(BusinessId(1)),
            cost_price: Some(cost_price),
            is_active: Some(is_active),
        }
        .validate()
        .unwrap()
        .insert(db)
        .await
        .unwrap()
    }

    #[test]
    fn test_parse_event_kind() {
        assert_eq!(EventKind::parse(Some("click")).unwrap(), EventKind::Click);
        assert_eq!(EventKind::parse(Some("impression")).unwrap(), EventKind::Impression);
        assert!(matches!(EventKind::parse(None), Err(AppError::Validation(_))));
        assert!(matches!(EventKind::parse(Some("Click")), Err(AppError::Validation(_))));
        assert!(matches!(EventKind::parse(Some("view")), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_counter_lookup() {
        assert_eq!(EventKind::Click.counter().as_str(), "click_count");
        assert_eq!(EventKind::Impression.counter().as_str(), "impression_count");
    }

    #[tokio::test]
    async fn test_two_clicks_add_two() {
        let db = test_connection().await;
        let banner = insert_banner(&db, 10.0, true).await;

        let first = record_event(&db, banner.id, EventKind::Click).await.unwrap();
        let second = record_event(&db, banner.id, EventKind::Click).await.unwrap();
        assert_eq!(first.count, 1);
        assert_eq!(second.count, 2);
        assert_eq!(second.kind, EventKind::Click);

        let stored = Banner::find_by_id(banner.id).one(&db).await.unwrap().unwrap();
        assert_eq!(stored.click_count, banner.click_count + 2);
        assert_eq!(stored.impression_count, banner.impression_count);
    }

    #[tokio::test]
    async fn test_impression_leaves_clicks_alone() {
        let db = test_connection().await;
        let banner = insert_banner(&db, 10.0, true).await;

        record_event(&db, banner.id, EventKind::Impression).await.unwrap();
        let result = record_event(&db, banner.id, EventKind::Impression).await.unwrap();
        assert_eq!(result.count, 2);

        let stored = Banner::find_by_id(banner.id).one(&db).await.unwrap().unwrap();
        assert_eq!(stored.impression_count, 2);
        assert_eq!(stored.click_count, 0);
    }

    #[tokio::test]
    async fn test_unknown_banner() {
        let db = test_connection().await;
        let banner = insert_banner(&db, 10.0, true).await;

        let err = record_event(&db, banner.id + 100, EventKind::Click).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let stored = Banner::find_by_id(banner.id).one(&db).await.unwrap().unwrap();
        assert_eq!(stored.click_count, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_clicks_are_not_lost() {
        use crate::migration::{connect, Migrator};
        use sea_orm_migration::MigratorTrait;

        // 多连接池需要文件库，内存库只有一个连接
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("bizdir.db").display());
        let db = connect(&url).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let banner = insert_banner(&db, 10.0, true).await;
        let banner_id = banner.id;

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { record_event(&db, banner_id, EventKind::Click).await })
            })
            .collect();

        let mut counts = Vec::new();
        for handle in handles {
            counts.push(handle.await.unwrap().unwrap().count);
        }
        counts.sort_unstable();
        assert_eq!(counts, (1..=100).collect::<Vec<i64>>());

        let stored = Banner::find_by_id(banner.id).one(&db).await.unwrap().unwrap();
        assert_eq!(stored.click_count, 100);
        assert_eq!(stored.impression_count, 0);
    }
}
