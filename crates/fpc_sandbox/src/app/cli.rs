use std::path::PathBuf;

use super::loop_runner::LoopConfig;

pub(crate) const LEVEL_ENV_VAR: &str = "FPC_LEVEL";
pub(crate) const SCRIPT_ENV_VAR: &str = "FPC_SCRIPT";
pub(crate) const CONFIG_ENV_VAR: &str = "FPC_CONFIG";

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SandboxOptions {
    pub(crate) level: Option<PathBuf>,
    pub(crate) script: Option<PathBuf>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) loop_config: LoopConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CliCommand {
    Run(SandboxOptions),
    Help,
}

/// Parses `args` (without the program name). Paths not given as flags fall
/// back to the environment through `env_lookup`.
pub(crate) fn parse_args(
    args: &[String],
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<CliCommand, String> {
    let mut options = SandboxOptions::default();
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "--level" => {
                options.level = Some(PathBuf::from(flag_value(args, index, "--level")?));
                index += 2;
            }
            "--script" => {
                options.script = Some(PathBuf::from(flag_value(args, index, "--script")?));
                index += 2;
            }
            "--config" => {
                options.config = Some(PathBuf::from(flag_value(args, index, "--config")?));
                index += 2;
            }
            "--tick-rate" => {
                let value = flag_value(args, index, "--tick-rate")?;
                let tick_rate = value
                    .parse::<u32>()
                    .map_err(|_| format!("invalid --tick-rate value '{value}' (expected u32)"))?;
                if tick_rate == 0 {
                    return Err("--tick-rate must be greater than 0".to_string());
                }
                options.loop_config.tick_rate = tick_rate;
                index += 2;
            }
            "--report-every" => {
                let value = flag_value(args, index, "--report-every")?;
                let report_every = value.parse::<u32>().map_err(|_| {
                    format!("invalid --report-every value '{value}' (expected u32)")
                })?;
                if report_every == 0 {
                    return Err("--report-every must be greater than 0".to_string());
                }
                options.loop_config.report_every = report_every;
                index += 2;
            }
            other => return Err(format!("unknown argument '{other}'\n\n{}", usage_text())),
        }
    }

    options.level = options.level.or_else(|| env_path(&env_lookup, LEVEL_ENV_VAR));
    options.script = options.script.or_else(|| env_path(&env_lookup, SCRIPT_ENV_VAR));
    options.config = options.config.or_else(|| env_path(&env_lookup, CONFIG_ENV_VAR));
    Ok(CliCommand::Run(options))
}

fn flag_value<'a>(args: &'a [String], index: usize, flag: &str) -> Result<&'a str, String> {
    args.get(index + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn env_path(env_lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Option<PathBuf> {
    env_lookup(var)
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
}

pub(crate) fn usage_text() -> String {
    [
        "fpc_sandbox - headless first-person movement sandbox",
        "",
        "Usage:",
        "  fpc_sandbox [--level <file>] [--script <file>] [--config <file>] [--tick-rate <u32>] [--report-every <u32>]",
        "",
        "Environment:",
        "  FPC_LEVEL, FPC_SCRIPT, FPC_CONFIG  used when the matching flag is absent",
        "  RUST_LOG                           log filter (default info)",
        "",
        "Defaults:",
        "  built-in demo level and script",
        "  --tick-rate 60",
        "  --report-every 60",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn empty_args_run_with_defaults() {
        let command = parse_args(&[], no_env).expect("parse");
        assert_eq!(command, CliCommand::Run(SandboxOptions::default()));
    }

    #[test]
    fn flags_are_parsed() {
        let command = parse_args(
            &args(&[
                "--level",
                "a.json",
                "--script",
                "b.json",
                "--tick-rate",
                "120",
                "--report-every",
                "30",
            ]),
            no_env,
        )
        .expect("parse");
        let CliCommand::Run(options) = command else {
            panic!("expected run command");
        };
        assert_eq!(options.level, Some(PathBuf::from("a.json")));
        assert_eq!(options.script, Some(PathBuf::from("b.json")));
        assert_eq!(options.config, None);
        assert_eq!(options.loop_config.tick_rate, 120);
        assert_eq!(options.loop_config.report_every, 30);
    }

    #[test]
    fn environment_fills_missing_paths_only() {
        let env = |var: &str| match var {
            LEVEL_ENV_VAR => Some("env_level.json".to_string()),
            CONFIG_ENV_VAR => Some("  ".to_string()),
            _ => None,
        };
        let CliCommand::Run(options) =
            parse_args(&args(&["--script", "flag.json"]), env).expect("parse")
        else {
            panic!("expected run command");
        };
        assert_eq!(options.level, Some(PathBuf::from("env_level.json")));
        assert_eq!(options.script, Some(PathBuf::from("flag.json")));
        assert_eq!(options.config, None);

        let CliCommand::Run(options) =
            parse_args(&args(&["--level", "flag_level.json"]), env).expect("parse")
        else {
            panic!("expected run command");
        };
        assert_eq!(options.level, Some(PathBuf::from("flag_level.json")));
    }

    #[test]
    fn bad_values_are_reported() {
        assert_eq!(
            parse_args(&args(&["--tick-rate"]), no_env),
            Err("missing value for --tick-rate".to_string())
        );
        assert!(parse_args(&args(&["--tick-rate", "fast"]), no_env)
            .expect_err("not a number")
            .contains("expected u32"));
        assert!(parse_args(&args(&["--report-every", "0"]), no_env).is_err());
        assert!(parse_args(&args(&["--bogus"]), no_env)
            .expect_err("unknown flag")
            .starts_with("unknown argument '--bogus'"));
    }

    #[test]
    fn help_wins() {
        assert_eq!(
            parse_args(&args(&["--level", "x", "--help"]), no_env),
            Ok(CliCommand::Help)
        );
    }
}
