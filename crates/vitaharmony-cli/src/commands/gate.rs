use chrono::Utc;
use vitaharmony_core::events::Event;
use vitaharmony_core::gate;
use vitaharmony_core::Config;

pub fn run(url: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default().gate;
    if url.is_some() {
        config.url = url;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let mode = runtime.block_on(async {
        let mut rx = gate::spawn_gate_check(config);
        gate::wait_resolved(&mut rx).await
    });
    super::print_json(&Event::DisplayModeResolved { mode, at: Utc::now() })
}
