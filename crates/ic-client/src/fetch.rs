//! Record fetcher.
//!
//! Wraps the raw endpoints with what a list view needs: over-fetch
//! pagination for users, client-side pagination for groups and roles,
//! reserved-namespace filtering, consumer-userstore filtering and email
//! normalization.

use ic_model::{namespace, Group, Role, SearchRequest, User};
use tracing::debug;

use crate::api;
use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::notice::{classify, Notice, Operation};
use crate::paging::{moderate, paginate_local, Page, PageRequest};

/// Parameters of a user list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    /// Page window.
    pub page: PageRequest,
    /// SCIM filter expression.
    pub filter: Option<String>,
    /// Comma-separated attributes to return.
    pub attributes: Option<String>,
    /// Userstore to list from.
    pub domain: Option<String>,
}

impl UserQuery {
    /// Creates a query for a page window.
    #[must_use]
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Sets the SCIM filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the attribute list. `userName` is always requested, since
    /// list rows are keyed by it.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Option<String>) -> Self {
        self.attributes = attributes.and_then(|list| {
            let mut names: Vec<&str> = list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect();
            if names.is_empty() {
                return None;
            }
            if !names.iter().any(|name| name.eq_ignore_ascii_case("userName")) {
                names.push("userName");
            }
            Some(names.join(","))
        });
        self
    }

    /// Sets the userstore.
    #[must_use]
    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain;
        self
    }
}

/// Which roles a role list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RoleScope {
    /// Roles outside the reserved namespaces.
    #[default]
    Visible,
    /// Every role.
    All,
    /// Application roles only.
    Application,
    /// Everything except application roles.
    Internal,
}

impl RoleScope {
    /// Returns true when `role` belongs in this scope.
    #[must_use]
    pub fn includes(self, role: &Role) -> bool {
        match self {
            Self::Visible => !role.is_reserved(),
            Self::All => true,
            Self::Application => role.is_application(),
            Self::Internal => !role.is_application(),
        }
    }
}

/// Fetches records for display.
#[derive(Debug, Clone, Copy)]
pub struct RecordFetcher<'a> {
    client: &'a ApiClient,
}

impl<'a> RecordFetcher<'a> {
    /// Creates a fetcher over a client.
    #[must_use]
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetches a page of users.
    ///
    /// Users of the consumer userstore are dropped after the next-page
    /// decision, so a page may hold fewer than `limit` records.
    pub async fn fetch_users(&self, query: &UserQuery) -> ClientResult<Page<User>> {
        let response = api::users::list(
            self.client,
            query.page.request_count(),
            query.page.start_index(),
            query.filter.as_deref(),
            query.attributes.as_deref(),
            query.domain.as_deref(),
        )
        .await?;

        let consumer = self.client.context().consumer_userstore.as_str();
        let page = moderate(response.resources, query.page)
            .retain(|user| !user.userstore().eq_ignore_ascii_case(consumer))
            .map(|mut user| {
                user.normalize_emails();
                user
            });
        debug!(count = page.items.len(), has_next = page.has_next, "fetched users");
        Ok(page)
    }

    /// Fetches a page of groups outside the reserved namespaces.
    pub async fn fetch_groups(&self, domain: Option<&str>, page: PageRequest) -> ClientResult<Page<Group>> {
        let response = api::groups::list(self.client, domain).await?;
        Ok(paginate_local(visible_groups(response.resources), page))
    }

    /// Searches groups, hiding the reserved namespaces.
    pub async fn search_groups(
        &self,
        filter: &str,
        domain: Option<&str>,
        page: PageRequest,
    ) -> ClientResult<Page<Group>> {
        let request = SearchRequest::new(filter).with_domain(domain);
        let response = api::groups::search(self.client, &request).await?;
        Ok(paginate_local(visible_groups(response.resources), page))
    }

    /// Fetches a page of roles in a scope.
    pub async fn fetch_roles(
        &self,
        scope: RoleScope,
        domain: Option<&str>,
        page: PageRequest,
    ) -> ClientResult<Page<Role>> {
        let response = api::roles::list(self.client, domain).await?;
        let roles = response
            .resources
            .into_iter()
            .filter(|role| scope.includes(role))
            .collect();
        Ok(paginate_local(roles, page))
    }

    /// Searches roles, hiding the reserved namespaces.
    pub async fn search_roles(
        &self,
        filter: &str,
        domain: Option<&str>,
        page: PageRequest,
    ) -> ClientResult<Page<Role>> {
        let request = SearchRequest::new(filter).with_domain(domain);
        let response = api::roles::search(self.client, &request).await?;
        let roles = response
            .resources
            .into_iter()
            .filter(|role| RoleScope::Visible.includes(role))
            .collect();
        Ok(paginate_local(roles, page))
    }
}

fn visible_groups(groups: Vec<Group>) -> Vec<Group> {
    groups
        .into_iter()
        .filter(|group| !namespace::is_reserved(&group.display_name))
        .collect()
}

/// State of a rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<T> {
    /// Records currently shown.
    pub page: Page<T>,
    /// Notice raised by the last load, if it failed.
    pub notice: Option<Notice>,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            page: Page::default(),
            notice: None,
        }
    }
}

impl<T> ListView<T> {
    /// Applies the outcome of a load.
    ///
    /// On success the page replaces the current one. On failure the list is
    /// cleared and a classified notice is kept.
    pub fn apply(&mut self, result: ClientResult<Page<T>>, operation: Operation) {
        match result {
            Ok(page) => {
                self.page = page;
                self.notice = None;
            }
            Err(error) => {
                self.page = Page::empty(PageRequest::new(self.page.limit, self.page.offset));
                self.notice = Some(classify(&error, operation));
            }
        }
    }
}
