use carbonledger_factors::EmissionFactorTable;

#[tokio::main]
async fn main() {
    carbonledger_observability::init();

    let factors = match std::env::var("FACTORS_DIR") {
        Ok(dir) => EmissionFactorTable::from_dir(&dir)
            .unwrap_or_else(|e| panic!("failed to load factor tables from {dir}: {e}")),
        Err(_) => EmissionFactorTable::embedded().expect("embedded factor tables must parse"),
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = carbonledger_api::app::build_app(factors);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
