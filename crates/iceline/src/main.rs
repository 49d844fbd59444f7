use iceline::runtime::{boot, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let (config, pipeline) = boot::boot()?;
    run::run(config, pipeline).await
}
