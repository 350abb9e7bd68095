//! Assets and content-security-policy additions for the host's file viewer.

use serde::Serialize;
use tracing::debug;

use docserv_core::config::AppConfig;

/// Frame source always allowed in the viewer's policy.
pub const SELF_FRAME_DOMAIN: &str = "'self'";

/// A user of the host platform, as far as the viewer hook cares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerUser {
    /// User id.
    pub id: String,
    /// Ids of the groups the user belongs to.
    pub groups: Vec<String>,
}

impl ViewerUser {
    /// Creates a user with the given group memberships.
    pub fn new(id: impl Into<String>, groups: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }
}

/// A script or stylesheet owned by an app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Owning app.
    pub app: String,
    /// Asset name without extension.
    pub name: String,
}

/// What the host should add to the viewer page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewerInjection {
    /// Scripts to load, in order.
    pub scripts: Vec<Asset>,
    /// Stylesheets to load.
    pub styles: Vec<Asset>,
    /// Extra frame sources for the content security policy.
    pub frame_domains: Vec<String>,
}

/// Decides what the viewer page receives when it loads.
#[derive(Debug, Clone)]
pub struct ViewerHook {
    app_id: String,
    configured: bool,
    verified: bool,
    limit_groups: Vec<String>,
}

impl ViewerHook {
    /// Creates a hook from the application configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            app_id: config.viewer.app_id.clone(),
            configured: config.document_server.is_configured(),
            verified: config.document_server.verified,
            limit_groups: config.viewer.limit_groups.clone(),
        }
    }

    /// Called when the viewer loads for `user` (if anyone is signed in).
    pub fn on_load_viewer(&self, user: Option<&ViewerUser>) -> ViewerInjection {
        let mut injection = ViewerInjection {
            frame_domains: vec![SELF_FRAME_DOMAIN.to_string()],
            ..Default::default()
        };

        if self.configured && self.verified && self.is_user_allowed(user) {
            injection.scripts = vec![self.asset("viewer"), self.asset("listener")];
            injection.styles = vec![self.asset("viewer")];
        }

        debug!(
            user = user.map(|u| u.id.as_str()),
            scripts = injection.scripts.len(),
            "Viewer hook evaluated"
        );
        injection
    }

    /// Whether `user` may use the integration.
    ///
    /// Nobody signed in is never allowed; with no group limit everyone else is.
    pub fn is_user_allowed(&self, user: Option<&ViewerUser>) -> bool {
        let Some(user) = user else {
            return false;
        };
        if self.limit_groups.is_empty() {
            return true;
        }
        user.groups.iter().any(|g| self.limit_groups.contains(g))
    }

    fn asset(&self, name: &str) -> Asset {
        Asset {
            app: self.app_id.clone(),
            name: name.to_string(),
        }
    }
}
