use anyhow::{Context, bail};
use clap::Parser;
use core::time::Duration;
use nearmint::{
    AccountId, DEFAULT_OUTPUT_PATH, DEFAULT_PREFIX, DEFAULT_REFERRAL_CODE,
    DEFAULT_RELAYER_ENDPOINT, DEFAULT_RPC_ENDPOINTS, DEFAULT_USER_AGENT, RunConfig,
    TransportConfig, validate_prefix,
};
use std::path::PathBuf;

/// Upper bound on accounts per bulk run.
pub const MAX_BULK_COUNT: usize = 100;

/// Runtime configuration for the `nearmint` binary.
///
/// Every flag can also be set through the environment variable named in its
/// help text; a `.env` file in the working directory is loaded first.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "nearmint",
    version,
    about = "Provision NEAR wallet accounts through the mobile relayer"
)]
pub struct CliArgs {
    /// Register this exact account id instead of generating one.
    ///
    /// Must end in `.near`. Ignored in bulk mode.
    ///
    /// Environment variable: `HANDLE`
    #[arg(long, env = "HANDLE")]
    pub handle: Option<String>,

    /// Prefix for generated account ids (lowercase letters and digits).
    ///
    /// Capped so the longest generated name still fits an account id.
    ///
    /// Environment variable: `PREFIX`
    #[arg(long, env = "PREFIX", default_value_t = String::from(DEFAULT_PREFIX))]
    pub prefix: String,

    /// Referral code redeemed for every new account.
    ///
    /// Environment variable: `REFERRAL_CODE`
    #[arg(long = "ref", env = "REFERRAL_CODE", default_value_t = String::from(DEFAULT_REFERRAL_CODE))]
    pub referral_code: String,

    /// Skip referral redemption entirely.
    ///
    /// Environment variable: `NO_REFERRAL`
    #[arg(long, env = "NO_REFERRAL", default_value_t = false)]
    pub no_referral: bool,

    /// Number of accounts to create. Values above 1 switch to bulk mode.
    ///
    /// Environment variable: `BULK_COUNT`
    #[arg(long, env = "BULK_COUNT", default_value_t = 1)]
    pub bulk: usize,

    /// Pause between bulk attempts, in milliseconds.
    ///
    /// Environment variable: `DELAY_MS`
    #[arg(long, env = "DELAY_MS", default_value_t = 2000)]
    pub delay_ms: u64,

    /// Result document to create or merge into.
    ///
    /// Environment variable: `OUTPUT_PATH`
    #[arg(long, env = "OUTPUT_PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// RPC endpoints in priority order, comma separated.
    ///
    /// Environment variable: `RPC_ENDPOINTS`
    #[arg(
        long,
        env = "RPC_ENDPOINTS",
        value_delimiter = ',',
        default_values_t = DEFAULT_RPC_ENDPOINTS.map(String::from)
    )]
    pub rpc: Vec<String>,

    /// Base address of the account relayer.
    ///
    /// Environment variable: `RELAYER_URL`
    #[arg(long, env = "RELAYER_URL", default_value_t = String::from(DEFAULT_RELAYER_ENDPOINT))]
    pub relayer: String,

    /// Per-request timeout, in milliseconds.
    ///
    /// Environment variable: `HTTP_TIMEOUT_MS`
    #[arg(long, env = "HTTP_TIMEOUT_MS", default_value_t = 30_000)]
    pub timeout_ms: u64,

    /// `user-agent` header sent with every request.
    ///
    /// Environment variable: `USER_AGENT`
    #[arg(long, env = "USER_AGENT", default_value_t = String::from(DEFAULT_USER_AGENT))]
    pub user_agent: String,

    /// Candidate ids to probe before giving up on one account.
    ///
    /// Environment variable: `MAX_NAME_ATTEMPTS`
    #[arg(long, env = "MAX_NAME_ATTEMPTS", default_value_t = 10)]
    pub max_name_attempts: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Only honored in single mode.
    pub handle: Option<AccountId>,
    pub run: RunConfig,
    pub rpc_endpoints: Vec<String>,
    pub relayer_url: String,
    pub transport: TransportConfig,
}

impl AppConfig {
    pub fn is_bulk(&self) -> bool {
        self.run.count > 1
    }
}

impl TryFrom<CliArgs> for AppConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let prefix = args.prefix.trim().to_string();
        validate_prefix(&prefix).context("invalid PREFIX")?;

        let referral_code = if args.no_referral {
            None
        } else {
            let code = args.referral_code.trim();
            if code.len() < 3 {
                bail!("REFERRAL_CODE must be at least 3 characters");
            }
            Some(code.to_string())
        };

        if !(1..=MAX_BULK_COUNT).contains(&args.bulk) {
            bail!(
                "BULK_COUNT must be between 1 and {MAX_BULK_COUNT}, got {}",
                args.bulk
            );
        }

        let handle = args
            .handle
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(|h| {
                let h = h.to_ascii_lowercase();
                if !h.ends_with(".near") || h.len() < 6 {
                    bail!("HANDLE must end with .near and be at least 6 characters, got `{h}`");
                }
                h.parse::<AccountId>()
                    .with_context(|| format!("HANDLE `{h}` is not a valid account id"))
            })
            .transpose()?;

        let rpc_endpoints: Vec<String> = args
            .rpc
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(String::from)
            .collect();
        if rpc_endpoints.is_empty() {
            bail!("RPC_ENDPOINTS must name at least one endpoint");
        }

        if args.max_name_attempts == 0 {
            bail!("MAX_NAME_ATTEMPTS must be greater than 0");
        }

        if args.timeout_ms == 0 {
            bail!("HTTP_TIMEOUT_MS must be greater than 0");
        }

        Ok(Self {
            handle,
            run: RunConfig {
                prefix,
                referral_code,
                count: args.bulk,
                delay: Duration::from_millis(args.delay_ms),
                output_path: args.output,
                max_name_attempts: args.max_name_attempts,
            },
            rpc_endpoints,
            relayer_url: args.relayer.trim().to_string(),
            transport: TransportConfig {
                timeout: Duration::from_millis(args.timeout_ms),
                user_agent: args.user_agent,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use nearmint::MAX_PREFIX_LEN;
    use std::ffi::OsStr;

    fn parse(extra: &[&str]) -> anyhow::Result<AppConfig> {
        let mut argv = vec!["nearmint"];
        argv.extend_from_slice(extra);
        AppConfig::try_from(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn explicit_flags_are_applied() {
        let config = parse(&[
            "--prefix",
            "ab",
            "--ref",
            "XYZ123",
            "--bulk",
            "5",
            "--delay-ms",
            "10",
            "--rpc",
            "https://a.test, https://b.test",
            "--output",
            "out.json",
        ])
        .unwrap();

        assert!(config.is_bulk());
        assert_eq!(config.run.prefix, "ab");
        assert_eq!(config.run.referral_code.as_deref(), Some("XYZ123"));
        assert_eq!(config.run.count, 5);
        assert_eq!(config.run.delay, Duration::from_millis(10));
        assert_eq!(config.run.output_path, PathBuf::from("out.json"));
        assert_eq!(config.rpc_endpoints, ["https://a.test", "https://b.test"]);
    }

    #[test]
    fn no_referral_disables_redemption() {
        let config = parse(&["--no-referral", "--ref", "x"]).unwrap();
        assert_eq!(config.run.referral_code, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        for argv in [
            &["--prefix", "a"][..],
            &["--prefix", "Ab"],
            &["--prefix", "a_b"],
            &["--ref", "ab"],
            &["--bulk", "0"],
            &["--bulk", "101"],
            &["--handle", "yuli"],
            &["--handle", ".near"],
            &["--handle", "-bad-.near"],
            &["--rpc", " , "],
            &["--max-name-attempts", "0"],
            &["--timeout-ms", "0"],
        ] {
            assert!(parse(argv).is_err(), "{argv:?} should be rejected");
        }
    }

    #[test]
    fn prefix_length_is_capped() {
        let longest = "a".repeat(MAX_PREFIX_LEN);
        let config = parse(&["--prefix", &longest]).unwrap();
        assert_eq!(config.run.prefix, longest);

        let too_long = "a".repeat(MAX_PREFIX_LEN + 1);
        assert!(parse(&["--prefix", &too_long]).is_err());
    }

    #[test]
    fn no_referral_reads_its_env_var() {
        let command = CliArgs::command();
        let env = command
            .get_arguments()
            .find(|a| a.get_id() == "no_referral")
            .and_then(|a| a.get_env());
        assert_eq!(env, Some(OsStr::new("NO_REFERRAL")));
    }

    #[test]
    fn handle_is_normalized() {
        let config = parse(&["--handle", " Yuli12.NEAR "]).unwrap();
        assert_eq!(config.handle.unwrap().as_str(), "yuli12.near");
    }
}
