use dotenvy::dotenv;

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = server::startup::load_config()?;

    // worker_threads 已在配置归一化时保证为正数
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    if let Some(workers) = cfg.server.worker_threads {
        builder.worker_threads(workers);
    }
    let runtime = builder.enable_all().build()?;
    runtime.block_on(server::run(cfg))
}
