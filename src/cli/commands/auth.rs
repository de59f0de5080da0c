use clap::{Arg, Command};

pub const ARG_MFA_SECRET: &str = "mfa-secret";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_MFA_SECRET)
            .long("mfa-secret")
            .help("Server-wide secret used to verify signed mfa_key tokens")
            .long_help(
                "Server-wide secret used to verify signed mfa_key tokens. All instances \
                 completing MFA challenges for the same login service must share this secret, \
                 otherwise tokens issued by the login step will not verify.",
            )
            .env("KONFIRMI_MFA_SECRET")
            .hide_env_values(true)
            .required(true),
    )
}
