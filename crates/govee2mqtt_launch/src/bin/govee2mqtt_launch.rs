//! govee2mqtt-v2 add-on launcher
//!
//! Usage:
//!   govee2mqtt-launch
//!   govee2mqtt-launch --options ./options.json --dry-run
//!   govee2mqtt-launch -- --once

use govee2mqtt_launch::runtime::CONNECT_TIMEOUT;
use govee2mqtt_launch::{tcp_reachable, AddonOptions, LaunchArgs, Launcher, SupervisorClient};

fn main() {
    let args: LaunchArgs = argh::from_env();

    // Options are read before logging so the add-on log level applies to the launcher too
    let options = AddonOptions::from_file(&args.options);

    // Initialize logging
    let log_level = args
        .log_level
        .or_else(|| options.as_ref().ok().map(|o| o.log_level))
        .unwrap_or_default();
    let env = env_logger::Env::default().default_filter_or(log_level.as_filter());
    env_logger::init_from_env(env);

    let options = match options {
        Ok(options) => options,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Loaded add-on options from {}", args.options);

    // Fail on bad options before touching the Supervisor
    if let Err(e) = options.validate() {
        log::error!("Launch failed: {}", e);
        std::process::exit(1);
    }

    let supervisor = match SupervisorClient::from_env(args.supervisor_url.as_str()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create Supervisor client: {}", e);
            std::process::exit(1);
        }
    };

    let launcher = Launcher::new(args.launch_config());
    let service = launcher.config().service.clone();

    let plan = match launcher.prepare(
        &options,
        || supervisor.probe(&service),
        |endpoint| tcp_reachable(endpoint, CONNECT_TIMEOUT),
    ) {
        Ok(plan) => plan,
        Err(e) => {
            log::error!("Launch failed: {}", e);
            std::process::exit(1);
        }
    };

    // Dry run mode
    if args.dry_run {
        println!("{}", plan);
        return;
    }

    match plan.execute() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            log::error!("Launch failed: {}", e);
            std::process::exit(1);
        }
    }
}
