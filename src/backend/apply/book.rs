use std::sync::Arc;

use tokio::sync::RwLock;

use crate::shared::Application;

/// Submitted franchise applications
///
/// Cheap to clone; all clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct ApplicationBook {
    applications: Arc<RwLock<Vec<Application>>>,
}

impl ApplicationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with previously persisted applications
    pub async fn restore(&self, applications: Vec<Application>) {
        *self.applications.write().await = applications;
    }

    pub async fn insert(&self, application: Application) {
        self.applications.write().await.push(application);
    }

    /// All applications, newest first
    ///
    /// Applications with equal timestamps are listed in reverse submission order.
    pub async fn list(&self) -> Vec<Application> {
        let mut applications = self.applications.read().await.clone();
        applications.reverse();
        applications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        applications
    }

    pub async fn len(&self) -> usize {
        self.applications.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.applications.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::ApplyRequest;
    use chrono::{Duration, Utc};

    fn application(nickname: &str, age_minutes: i64) -> Application {
        let mut application = Application::from_request(
            ApplyRequest::default(),
            format!("kakao-{}", nickname),
            nickname.to_string(),
        );
        application.created_at = Utc::now() - Duration::minutes(age_minutes);
        application
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let book = ApplicationBook::new();
        book.insert(application("old", 30)).await;
        book.insert(application("new", 1)).await;
        book.insert(application("mid", 10)).await;

        let nicknames: Vec<String> = book.list().await.into_iter().map(|a| a.nickname).collect();
        assert_eq!(nicknames, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_restore_replaces_contents() {
        let book = ApplicationBook::new();
        book.insert(application("stale", 5)).await;
        book.restore(vec![application("a", 1), application("b", 2)]).await;

        assert_eq!(book.len().await, 2);
    }
}
