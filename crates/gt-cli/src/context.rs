use anyhow::{Context, bail};
use gt_backend::{
    AuthError, AuthEvent, BackendError, HistoryStore, MemoryHistory, SessionContext, SupabaseClient,
    SupabaseHistory, secret_store,
};
use gt_config::GhostConfig;
use gt_app::ViewController;
use gt_core::{HistoryEntry, NewHistoryEntry, Subscription};
use gt_llm::{ChatClient, GeminiTransport, ReportGenerator};

/// History backend chosen at startup.
#[derive(Debug, Clone)]
pub enum History {
    Remote(SupabaseHistory),
    Local(MemoryHistory),
}

impl HistoryStore for History {
    async fn insert(&self, entry: &NewHistoryEntry) -> Result<(), BackendError> {
        match self {
            Self::Remote(store) => store.insert(entry).await,
            Self::Local(store) => store.insert(entry).await,
        }
    }

    async fn list(&self, user_id: &str) -> Result<Vec<HistoryEntry>, BackendError> {
        match self {
            Self::Remote(store) => store.list(user_id).await,
            Self::Local(store) => store.list(user_id).await,
        }
    }
}

/// Everything a command needs: config, backend client, and the session.
pub struct AppContext {
    pub config: GhostConfig,
    pub offline: bool,
    pub session: SessionContext,
    supabase: Option<SupabaseClient>,
    _persist: Subscription,
}

impl AppContext {
    /// Restore the persisted session and, when online, refresh it if needed.
    ///
    /// Every later session change is written back to the secret store.
    pub async fn open(config: GhostConfig, offline: bool) -> anyhow::Result<Self> {
        let supabase = if offline || !config.supabase.is_configured() {
            None
        } else {
            Some(SupabaseClient::from_config(&config.supabase).context("failed to build Supabase client")?)
        };

        let session = secret_store::load_session().map_or_else(SessionContext::new, SessionContext::with_session);
        let persist = session.on_change(persist_session);

        let ctx = Self {
            config,
            offline,
            session,
            supabase,
            _persist: persist,
        };

        if let Some(client) = &ctx.supabase {
            match ctx.session.ensure_fresh(client).await {
                Ok(_) => {}
                Err(AuthError::SessionExpired) => {
                    tracing::warn!("stored session expired; sign in again with `gtrace auth login`");
                }
                Err(error) => tracing::warn!(%error, "could not refresh stored session"),
            }
        }

        Ok(ctx)
    }

    /// The Supabase client, or an error explaining why there is none.
    pub fn supabase(&self) -> anyhow::Result<&SupabaseClient> {
        if self.offline {
            bail!("this command needs the backend and --offline is set");
        }
        self.supabase
            .as_ref()
            .context("Supabase is not configured (set [supabase] url and anon_key)")
    }

    pub fn history(&self) -> History {
        match &self.supabase {
            Some(client) => History::Remote(SupabaseHistory::new(client.clone(), self.session.clone())),
            None => History::Local(MemoryHistory::new()),
        }
    }

    /// The Gemini key from keychain, config, or the key file.
    pub fn api_key(&self) -> anyhow::Result<String> {
        match secret_store::resolve_api_key(&self.config.gemini.api_key) {
            Some((key, source)) => {
                tracing::debug!(%source, "using Gemini API key");
                Ok(key)
            }
            None => bail!("no Gemini API key found; run `gtrace key set` or set GHOSTTRACE_GEMINI__API_KEY"),
        }
    }

    pub fn transport(&self) -> anyhow::Result<GeminiTransport> {
        GeminiTransport::from_config(&self.config.gemini).context("failed to build Gemini transport")
    }

    pub fn generator(&self) -> anyhow::Result<ReportGenerator<GeminiTransport>> {
        Ok(ReportGenerator::new(self.transport()?))
    }

    pub fn chat_client(&self) -> anyhow::Result<ChatClient<GeminiTransport>> {
        Ok(ChatClient::new(self.transport()?))
    }
}

fn persist_session(event: &AuthEvent) {
    let result = match event {
        AuthEvent::SignedIn(session) | AuthEvent::TokenRefreshed(session) => secret_store::save_session(session),
        AuthEvent::SignedOut => secret_store::clear_session(),
    };
    if let Err(error) = result {
        tracing::warn!(%error, "failed to persist session change");
    }
}

/// The controller driving `trace`, `suggestions --run` and `history`.
pub type Controller = ViewController<GeminiTransport, History>;

impl AppContext {
    pub fn controller(&self) -> anyhow::Result<Controller> {
        Ok(ViewController::new(
            self.generator()?,
            self.history(),
            self.session.clone(),
            self.api_key()?,
        ))
    }
}
