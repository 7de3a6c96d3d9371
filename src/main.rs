use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use car_insurance_backend::config::environment::EnvironmentConfig;
use car_insurance_backend::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚗 Car Insurance Policy API");
    info!("================================================");

    let config = EnvironmentConfig::from_env()?;
    let addr: SocketAddr = config.server_url().parse()?;

    if config.is_development() {
        info!("🔧 Modo desarrollo: CORS permisivo si CORS_ORIGINS está vacío");
    }
    info!("📂 Base de datos CSV: {}", config.database_dir.display());
    info!("🤖 Modelo de prima: {}/predict", config.model_url.trim_end_matches('/'));

    let app_state = AppState::initialize(config).await?;
    let app = create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /              - Endpoint de prueba");
    info!("   GET    /car           - Listar vehículos");
    info!("   POST   /car           - Crear vehículo");
    info!("   POST   /car/update    - Actualizar vehículo");
    info!("   DELETE /car/:car_id   - Eliminar vehículo");
    info!("   GET    /customer      - Listar pólizas");
    info!("   DELETE /customer/:id  - Eliminar póliza");
    info!("   POST   /compute       - Calcular prima");
    info!("   POST   /commit        - Emitir póliza");
    info!("   POST   /update        - Renovar póliza con nueva prima");
    info!("   POST   /updatedebug   - Sobrescribir póliza");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
