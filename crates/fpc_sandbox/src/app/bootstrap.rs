use fpc_core::{load_level, Character, Level, MovementConfig, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::cli::SandboxOptions;
use super::loop_runner::LoopConfig;
use super::script::InputScript;
use super::SandboxError;

pub(crate) struct AppWiring {
    pub(crate) world: World,
    pub(crate) character: Character,
    pub(crate) script: InputScript,
    pub(crate) loop_config: LoopConfig,
}

pub(crate) fn build_app(options: &SandboxOptions) -> Result<AppWiring, SandboxError> {
    let config = match &options.config {
        Some(path) => {
            let config = MovementConfig::load(path)?;
            info!(path = %path.display(), "movement_config_loaded");
            config
        }
        None => MovementConfig::default(),
    };

    let level = match &options.level {
        Some(path) => load_level(path)?.0,
        None => {
            info!("using built-in demo level");
            Level::demo()
        }
    };

    let script = match &options.script {
        Some(path) => {
            let script = InputScript::load(path)?;
            info!(path = %path.display(), frames = script.frames.len(), "script_loaded");
            script
        }
        None => {
            info!("using built-in demo script");
            InputScript::demo()
        }
    };

    Ok(AppWiring {
        world: level.build_world(&config),
        character: level.spawn_character(&config),
        script,
        loop_config: options.loop_config,
    })
}

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
