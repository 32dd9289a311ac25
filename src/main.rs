use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use user_api::{
    build_router,
    config::AppConfig,
    infrastructure::logger::Logger,
    open_store,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("加载配置失败")?;
    let _log_guard = Logger::init(&config.logging).context("初始化日志失败")?;

    match &config.source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置和环境变量"),
    }

    info!("启动用户 API 服务，存储后端: {}", config.database.backend);

    // 存储连接失败时不开始监听
    let store = match open_store(&config.database).await {
        Ok(store) => store,
        Err(err) => {
            error!("连接存储失败: {}", err);
            return Err(err).context("连接存储失败");
        }
    };
    info!("已连接存储: {}", store.backend());

    let app = build_router(store, &config.server);

    let listener = TcpListener::bind(config.server.socket_addr())
        .await
        .with_context(|| format!("无法绑定到 {}", config.server.socket_addr()))?;
    let addr = listener.local_addr()?;

    info!("🚀 用户 API 服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /api/users             - 获取所有用户");
    info!("   GET    /api/users/:id         - 获取特定用户");
    info!("   POST   /api/users/add         - 创建新用户");
    info!("   PUT    /api/users/update/:id  - 更新用户");
    info!("   DELETE /api/users/delete/:id  - 删除用户");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("监听退出信号失败: {}", err);
        std::future::pending::<()>().await;
    }
}
