//! Secret commands.
//!
//! Provides `keysafe set|get|delete|contains`, backed by the platform
//! keychain via the `keysafe-secrets` crate.

use anyhow::Context;
use base64::Engine;
use clap::{Args, ValueEnum};
use keysafe_core::config::StoreSettings;
use keysafe_core::{Accessibility, Config};
use keysafe_secrets::{AsyncKeychain, AsyncSecretStore, Keychain, SecretKey, StoreConfiguration};
use tracing::debug;

/// Overrides for the configured item policy.
#[derive(Args, Debug, Default)]
pub struct PolicyArgs {
    /// When the secret may be read (overrides config)
    #[arg(long)]
    pub accessibility: Option<Accessibility>,

    /// Keychain access group (overrides config)
    #[arg(long)]
    pub sharing_group: Option<String>,

    /// Take part in account-level sync (ignored for device-only accessibility)
    #[arg(long, overrides_with = "no_synchronizable")]
    pub synchronizable: bool,

    /// Stay local even if the config enables sync
    #[arg(long, overrides_with = "synchronizable")]
    pub no_synchronizable: bool,
}

impl PolicyArgs {
    /// Apply these overrides on top of the configured settings.
    pub fn resolve(&self, base: &StoreSettings) -> StoreConfiguration {
        let settings = StoreSettings {
            accessibility: self.accessibility.unwrap_or(base.accessibility),
            sharing_group: self
                .sharing_group
                .clone()
                .or_else(|| base.sharing_group.clone()),
            synchronizable: !self.no_synchronizable
                && (self.synchronizable || base.synchronizable),
        };
        StoreConfiguration::from(&settings)
    }
}

/// A secret key plus policy overrides.
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Secret key as `namespace/name`, or `name` in the default namespace
    pub key: String,

    #[command(flatten)]
    pub policy: PolicyArgs,
}

impl KeyArgs {
    fn secret_key(&self, config: &Config) -> anyhow::Result<SecretKey> {
        Ok(SecretKey::parse_with_default(
            &self.key,
            config.default_namespace.as_deref(),
        )?)
    }
}

/// Arguments for `keysafe set`.
#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub target: KeyArgs,

    /// Secret value as text (if no value is given, prompts for hidden input)
    #[arg(long, conflicts_with_all = ["hex", "base64"])]
    pub value: Option<String>,

    /// Secret value as hex
    #[arg(long, conflicts_with = "base64")]
    pub hex: Option<String>,

    /// Secret value as standard base64
    #[arg(long)]
    pub base64: Option<String>,
}

/// Output encoding for `keysafe get`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    /// UTF-8 text
    #[default]
    Text,
    /// Lowercase hex
    Hex,
    /// Standard base64
    Base64,
}

/// Arguments for `keysafe get`.
#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub target: KeyArgs,

    /// How to print the value
    #[arg(long, value_enum, default_value_t = Encoding::Text)]
    pub encoding: Encoding,
}

fn open_store(policy: &PolicyArgs, config: &Config) -> AsyncKeychain<Keychain> {
    let effective = policy.resolve(&config.store);
    debug!(
        accessibility = %effective.accessibility(),
        sharing_group = effective.sharing_group(),
        synchronizable = effective.synchronizable(),
        "Opening keychain"
    );
    AsyncKeychain::new(Keychain::system(effective))
}

/// Decode the payload given on the command line, or prompt for it.
pub fn read_payload(args: &SetArgs, key: &SecretKey) -> anyhow::Result<Vec<u8>> {
    let payload = if let Some(value) = &args.value {
        value.as_bytes().to_vec()
    } else if let Some(hex_value) = &args.hex {
        hex::decode(hex_value.trim()).context("Invalid hex value")?
    } else if let Some(b64) = &args.base64 {
        base64::engine::general_purpose::STANDARD
            .decode(b64.trim())
            .context("Invalid base64 value")?
    } else {
        rpassword::prompt_password(format!("Enter value for '{key}': "))
            .context("Failed to read secret")?
            .into_bytes()
    };

    if payload.is_empty() {
        anyhow::bail!("Secret value must not be empty");
    }
    Ok(payload)
}

/// Render a payload for printing.
pub fn render(payload: &[u8], encoding: Encoding) -> anyhow::Result<String> {
    Ok(match encoding {
        Encoding::Text => std::str::from_utf8(payload)
            .context("Value is not valid UTF-8; use --encoding hex or base64")?
            .to_string(),
        Encoding::Hex => hex::encode(payload),
        Encoding::Base64 => base64::engine::general_purpose::STANDARD.encode(payload),
    })
}

pub async fn set(args: SetArgs, config: &Config) -> anyhow::Result<()> {
    let key = args.target.secret_key(config)?;
    let payload = read_payload(&args, &key)?;
    let store = open_store(&args.target.policy, config);

    store.set(key.clone(), payload).await?;
    println!("Secret '{key}' stored.");
    Ok(())
}

pub async fn get(args: GetArgs, config: &Config) -> anyhow::Result<()> {
    let key = args.target.secret_key(config)?;
    let store = open_store(&args.target.policy, config);

    match store.get(key.clone()).await? {
        Some(value) => {
            println!("{}", render(value.expose_secret(), args.encoding)?);
            Ok(())
        }
        None => anyhow::bail!("Secret '{key}' not found"),
    }
}

pub async fn delete(args: KeyArgs, config: &Config) -> anyhow::Result<()> {
    let key = args.secret_key(config)?;
    let store = open_store(&args.policy, config);

    store.delete(key.clone()).await?;
    println!("Secret '{key}' deleted.");
    Ok(())
}

pub async fn contains(args: KeyArgs, config: &Config) -> anyhow::Result<()> {
    let key = args.secret_key(config)?;
    let store = open_store(&args.policy, config);

    if store.contains(key.clone()).await? {
        println!("yes");
        Ok(())
    } else {
        anyhow::bail!("Secret '{key}' not found")
    }
}
