//
//  skyhook-cli
//  reconcile.rs
//

//! # Remote-Wiring Reconciliation
//!
//! After `sky apps create` has created an application, the new app's git
//! endpoint should be wired into the local repository as the conventional
//! remote (named [`crate::APP_NAME`]). Pre-existing remotes are user state,
//! so the reconciler never silently clobbers them: an exact name collision on
//! the conventional remote is resolved only by explicit confirmation, and
//! every degraded path ends in instructions for wiring the remote manually
//! with `sky git remote`.
//!
//! ## State machine
//!
//! 1. **FetchRemote**: ask the server for the app's git endpoint. Failure
//!    here aborts only the remote-wiring stage: the application itself stays
//!    created (a deliberate partial success, since undoing creation is a
//!    separate, riskier operation).
//! 2. **NoVcsContext**: outside a repository, skip wiring entirely.
//! 3. **InspectRemotes**: read the name→URL mapping.
//!    - Conventional name absent: bind it to the fetched URL. Done.
//!    - Conventional name present: confirm replacement. Decline leaves the
//!      mapping untouched; accept removes the old binding, then adds the new
//!      one, so no duplicate or dangling name is left behind.
//!
//! Only the exact conventional name is ever a conflict; differently-named
//! remotes are never inspected or touched, whatever URL they point at.

use anyhow::Result;
use tracing::debug;

use crate::api::{ApiClient, ApiError};
use crate::context::RemoteStore;

/// Terminal outcome of one remote-wiring pass.
#[derive(Debug)]
pub enum RemoteWiring {
    /// The conventional remote did not exist and now points at the app.
    Bound {
        /// The git endpoint the remote was bound to.
        url: String,
    },
    /// The user accepted replacement; the old binding is fully removed.
    Replaced {
        /// URL of the binding that was removed.
        old_url: String,
        /// The git endpoint the remote now points at.
        url: String,
    },
    /// The user declined replacement; local remotes are untouched.
    Declined {
        /// URL of the existing binding that was kept.
        existing_url: String,
    },
    /// Not inside a git repository; wiring was skipped entirely.
    NoRepository,
    /// The endpoint could not be fetched; the app exists but stays unwired.
    FetchFailed {
        /// The API failure, surfaced for display.
        error: ApiError,
    },
}

/// Runs the remote-wiring stage for a freshly created application.
///
/// # Parameters
///
/// * `client` - Client used to fetch the app's assigned git endpoint
/// * `app_id` - The application just created
/// * `store` - The repository's remotes, or `None` outside a repository
/// * `confirm_replace` - Asks the user whether to replace the existing
///   binding (receives its URL); only invoked on an exact name collision
///
/// # Errors
///
/// Only local VCS failures (reading or rewriting the remote mapping) and
/// prompt I/O propagate as errors; API failure during the fetch is a
/// [`RemoteWiring::FetchFailed`] outcome, not an error.
pub async fn wire_app_remote(
    client: &ApiClient,
    app_id: &str,
    store: Option<&mut dyn RemoteStore>,
    confirm_replace: &mut dyn FnMut(&str) -> Result<bool>,
) -> Result<RemoteWiring> {
    let url = match client.get_git_remote(app_id).await {
        Ok(url) => url,
        Err(error) => {
            debug!(app_id, %error, "could not fetch git endpoint");
            return Ok(RemoteWiring::FetchFailed { error });
        }
    };

    let Some(store) = store else {
        return Ok(RemoteWiring::NoRepository);
    };

    let remotes = store.remotes()?;
    if let Some(existing_url) = remotes.get(crate::APP_NAME) {
        if !confirm_replace(existing_url)? {
            return Ok(RemoteWiring::Declined {
                existing_url: existing_url.clone(),
            });
        }
        // Remove-then-add of the conventional name only; the new binding is
        // added before this function returns, so a crash in between leaves
        // at worst a missing remote, never a wrong one.
        store.remove_remote(crate::APP_NAME)?;
        store.add_remote(crate::APP_NAME, &url)?;
        debug!(app_id, %url, "replaced existing remote");
        return Ok(RemoteWiring::Replaced {
            old_url: existing_url.clone(),
            url,
        });
    }

    store.add_remote(crate::APP_NAME, &url)?;
    debug!(app_id, %url, "bound new remote");
    Ok(RemoteWiring::Bound { url })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use super::*;
    use crate::auth::Credentials;

    /// In-memory stand-in for the git remote mapping.
    #[derive(Default)]
    struct FakeRemotes {
        map: BTreeMap<String, String>,
    }

    impl RemoteStore for FakeRemotes {
        fn remotes(&self) -> Result<BTreeMap<String, String>> {
            Ok(self.map.clone())
        }

        fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
            anyhow::ensure!(!self.map.contains_key(name), "remote {name} exists");
            self.map.insert(name.to_string(), url.to_string());
            Ok(())
        }

        fn remove_remote(&mut self, name: &str) -> Result<()> {
            anyhow::ensure!(self.map.remove(name).is_some(), "no remote {name}");
            Ok(())
        }
    }

    async fn server_with_remote(url: &str) -> mockito::ServerGuard {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/apps/blog/")
            .with_status(200)
            .with_body(format!(
                "{{\"owner\": \"alice\", \"remote\": \"{url}\"}}"
            ))
            .create_async()
            .await;
        server
    }

    fn client(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(
            &server.url(),
            Credentials::new("alice", "topsecret"),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn binds_when_no_conventional_remote_exists() {
        let server = server_with_remote("git@host:x.git").await;
        let mut remotes = FakeRemotes::default();
        remotes.add_remote("origin", "git@other:project.git").unwrap();

        let mut confirm = |_: &str| -> Result<bool> { panic!("no prompt expected") };
        let outcome = wire_app_remote(&client(&server), "blog", Some(&mut remotes), &mut confirm)
            .await
            .unwrap();

        assert!(matches!(outcome, RemoteWiring::Bound { ref url } if url == "git@host:x.git"));
        assert_eq!(remotes.map["sky"], "git@host:x.git");
        // Differently-named remotes are never touched.
        assert_eq!(remotes.map["origin"], "git@other:project.git");
    }

    #[tokio::test]
    async fn decline_leaves_remotes_untouched() {
        let server = server_with_remote("git@host:new.git").await;
        let mut remotes = FakeRemotes::default();
        remotes.add_remote("sky", "git@host:old.git").unwrap();

        let mut asked_about = None;
        let mut confirm = |existing: &str| -> Result<bool> {
            asked_about = Some(existing.to_string());
            Ok(false)
        };
        let outcome = wire_app_remote(&client(&server), "blog", Some(&mut remotes), &mut confirm)
            .await
            .unwrap();

        assert!(
            matches!(outcome, RemoteWiring::Declined { ref existing_url } if existing_url == "git@host:old.git")
        );
        assert_eq!(asked_about.as_deref(), Some("git@host:old.git"));
        assert_eq!(remotes.map.len(), 1);
        assert_eq!(remotes.map["sky"], "git@host:old.git");
    }

    #[tokio::test]
    async fn accept_replaces_the_old_binding_completely() {
        let server = server_with_remote("git@host:new.git").await;
        let mut remotes = FakeRemotes::default();
        remotes.add_remote("sky", "git@host:old.git").unwrap();

        let mut confirm = |_: &str| -> Result<bool> { Ok(true) };
        let outcome = wire_app_remote(&client(&server), "blog", Some(&mut remotes), &mut confirm)
            .await
            .unwrap();

        match outcome {
            RemoteWiring::Replaced { old_url, url } => {
                assert_eq!(old_url, "git@host:old.git");
                assert_eq!(url, "git@host:new.git");
            }
            other => panic!("expected Replaced, got {other:?}"),
        }
        // Exactly one binding remains, the new one.
        assert_eq!(remotes.map.len(), 1);
        assert_eq!(remotes.map["sky"], "git@host:new.git");
    }

    #[tokio::test]
    async fn outside_a_repository_wiring_is_skipped() {
        let server = server_with_remote("git@host:x.git").await;
        let mut confirm = |_: &str| -> Result<bool> { panic!("no prompt expected") };
        let outcome = wire_app_remote(&client(&server), "blog", None, &mut confirm)
            .await
            .unwrap();
        assert!(matches!(outcome, RemoteWiring::NoRepository));
    }

    #[tokio::test]
    async fn fetch_failure_is_partial_success_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/apps/blog/")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let mut remotes = FakeRemotes::default();
        let mut confirm = |_: &str| -> Result<bool> { panic!("no prompt expected") };
        let outcome = wire_app_remote(&client(&server), "blog", Some(&mut remotes), &mut confirm)
            .await
            .unwrap();

        match outcome {
            RemoteWiring::FetchFailed { error } => assert_eq!(error.status(), Some(500)),
            other => panic!("expected FetchFailed, got {other:?}"),
        }
        assert!(remotes.map.is_empty());
    }
}
