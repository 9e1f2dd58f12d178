use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, RuntimeErr};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Establish a SeaORM database connection backed by a SQLite file.
pub async fn establish_connection(db_path: &Path) -> Result<DatabaseConnection, DbErr> {
    // 1. 确保数据库所在的目录存在
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| DbErr::Conn(RuntimeErr::Internal(format!("无法创建数据库目录: {}", e))))?;
    }

    if !db_path.exists() {
        log::info!("首次启动，创建数据库: {}", db_path.display());
    }

    // 2. 使用 `url` crate 安全地构建连接字符串
    let db_url = Url::from_file_path(db_path).map_err(|_| {
        DbErr::Conn(RuntimeErr::Internal(format!(
            "Invalid database path: {}",
            db_path.display()
        )))
    })?;

    let connection_string = format!("sqlite:{}?mode=rwc", db_url.path());

    establish_connection_with_url(&connection_string).await
}

/// 按连接字符串建立连接（测试使用 `sqlite::memory:`）
pub async fn establish_connection_with_url(url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(1) // SQLite 单写者，连接池大小为 1 即可
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    Database::connect(options).await
}

/// 关闭数据库连接
pub async fn close_connection(conn: DatabaseConnection) -> Result<(), DbErr> {
    conn.close().await?;
    Ok(())
}
