//! Subcommands of the `signin` binary.
//!
//! Every invocation is one page load over the session file: boot, perform
//! the action, settle the UI and print it.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use signin_auth::{AuthConfig, FileStorage, ScriptedIdentityServices, UnloadedIdentityServices};
use signin_core::auth::{
    CallbackPayload, IdentityServices, Initiation, PromptOutcome, ProviderKind,
};
use url::Url;

use signin::app::Page;
use signin::render::{aprintln, p_b, render};
use signin::ui::{request_sign_out, AssumeYes, Confirm, TerminalConfirm};

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Show who is signed in
    Status,

    /// Sign in with a provider
    #[command(subcommand)]
    Login(LoginCommand),

    /// Handle the address the provider redirected back to
    Callback {
        /// Full redirect address, including `code`/`state` or `error`
        url: Url,
    },

    /// Sign out and clear the session
    Logout {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Run the Mock IdP for local authorization-code sign-ins
    #[cfg(feature = "mock")]
    MockIdp {
        /// Port to listen on
        #[arg(long, short, default_value = "3001", env = "MOCK_IDP_PORT")]
        port: u16,
    },
}

#[derive(Debug, clap::Subcommand)]
pub enum LoginCommand {
    /// Sign in with Google using an ID token from the Identity Services prompt
    Google {
        /// ID token (JWT) delivered by the prompt
        #[arg(long, env = "GOOGLE_CREDENTIAL")]
        credential: Option<String>,
    },

    /// Sign in with GitHub through the authorization-code redirect
    Github {
        /// Open the authorization page in the default browser
        #[arg(long)]
        open: bool,
    },
}

pub async fn run(command: Command, session_file: PathBuf) -> Result<()> {
    let config = AuthConfig::from_env()?;
    if config.uses_placeholder_client_ids() {
        tracing::warn!("Using placeholder client IDs; set GOOGLE_CLIENT_ID and GITHUB_CLIENT_ID");
    }
    let storage = Arc::new(FileStorage::new(session_file));

    match command {
        Command::Status => {
            let page = boot(config, storage, None, false).await;
            aprintln!("{}", render(&page.ui));
        }
        Command::Login(LoginCommand::Google { credential }) => {
            let mut page = boot(config, storage, None, credential.is_some()).await;
            let initiation = page
                .auth
                .controller
                .initiate_sign_in(ProviderKind::Google)
                .await;

            // The prompt hands the credential to the registered callback
            if let (Some(Initiation::Prompted), Some(token)) = (initiation, credential) {
                page.auth
                    .controller
                    .provider_callback(ProviderKind::Google, CallbackPayload::Credential(token))
                    .await;
            }

            page.settle();
            aprintln!("{}", render(&page.ui));
        }
        Command::Login(LoginCommand::Github { open }) => {
            let mut page = boot(config, storage, None, false).await;
            let initiation = page
                .auth
                .controller
                .initiate_sign_in(ProviderKind::GitHub)
                .await;
            page.settle();

            match initiation {
                Some(Initiation::Redirected(url)) => {
                    aprintln!("{}", p_b("Continue signing in at:"));
                    aprintln!("  {}", url);
                    aprintln!("Then run: signin callback '<redirect address>'");
                    if open {
                        open::that(url.as_str())
                            .with_context(|| format!("failed to open {url}"))?;
                    }
                }
                _ => aprintln!("{}", render(&page.ui)),
            }
        }
        Command::Callback { url } => {
            let page = boot(config, storage, Some(url), false).await;
            aprintln!("{}", render(&page.ui));
        }
        Command::Logout { yes } => {
            let mut page = boot(config, storage, None, false).await;
            let confirm: &dyn Confirm = if yes { &AssumeYes } else { &TerminalConfirm };
            if request_sign_out(confirm, &page.auth.controller).await {
                page.settle();
            }
            aprintln!("{}", render(&page.ui));
        }
        #[cfg(feature = "mock")]
        Command::MockIdp { port } => {
            signin_auth::mock_idp::MockIdpServer::new(port).run().await?;
        }
    }

    Ok(())
}

/// Open and boot a page at `address`, or at the configured base URL.
async fn boot(
    config: AuthConfig,
    storage: Arc<FileStorage>,
    address: Option<Url>,
    google_loaded: bool,
) -> Page {
    let address = address.unwrap_or_else(|| config.base_url.clone());
    let services: Arc<dyn IdentityServices> = if google_loaded {
        Arc::new(ScriptedIdentityServices::new(PromptOutcome::Displayed))
    } else {
        Arc::new(UnloadedIdentityServices)
    };

    let mut page = Page::open(config, storage, address, services);
    page.boot().await;
    page
}
