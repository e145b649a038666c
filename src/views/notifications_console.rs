use chrono::{DateTime, Utc};

use crate::error::AppResult;
use crate::models::{
    Notification, NotificationFilters, NotificationId, NotificationPage, NotificationType,
    StatusFilter, UserId,
};
use crate::services::NotificationService;

use super::Flash;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConsoleStatus {
    #[default]
    Idle,
    /// Waiting for the load tagged `request`.
    Loading { request: u64 },
    Loaded,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsoleState {
    pub status: ConsoleStatus,
    pub filters: NotificationFilters,
    pub notifications: Vec<Notification>,
    pub total_pages: u32,
    /// A mutation is in flight; its controls are disabled.
    pub busy: bool,
    pub flash: Option<Flash>,
    last_request: u64,
}

#[derive(Debug, Clone)]
pub enum ConsoleAction {
    LoadRequested,
    PageLoaded { request: u64, page: NotificationPage },
    LoadFailed { request: u64, message: String },
    StatusFilterChanged(StatusFilter),
    TypeFilterChanged(Option<NotificationType>),
    PageRequested(u32),
    MutationStarted,
    NotificationUpdated(Notification),
    NotificationDeleted { id: NotificationId, message: String },
    AllMarkedRead { at: DateTime<Utc>, message: String },
    MutationFailed(String),
    FlashDismissed,
}

impl ConsoleState {
    pub fn with_filters(filters: NotificationFilters) -> Self {
        Self {
            filters,
            ..Default::default()
        }
    }

    pub fn page(&self) -> u32 {
        self.filters.page
    }

    pub fn pending_request(&self) -> Option<u64> {
        match self.status {
            ConsoleStatus::Loading { request } => Some(request),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request().is_some()
    }

    /// Valid page indexes are `[0, total_pages)`; an empty result still has page 0.
    pub fn can_go_to(&self, page: u32) -> bool {
        page < self.total_pages.max(1)
    }

    pub fn can_go_previous(&self) -> bool {
        self.filters.page > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.filters.page + 1 < self.total_pages
    }

    pub fn unread_on_page(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }
}

fn is_current(state: &ConsoleState, request: u64) -> bool {
    state.pending_request() == Some(request)
}

pub fn reduce(mut state: ConsoleState, action: ConsoleAction) -> ConsoleState {
    match action {
        ConsoleAction::LoadRequested => {
            state.last_request += 1;
            state.status = ConsoleStatus::Loading {
                request: state.last_request,
            };
        }
        ConsoleAction::PageLoaded { request, page } => {
            if !is_current(&state, request) {
                tracing::debug!(request, "Discarding stale notifications page");
                return state;
            }
            state.notifications = page.content;
            state.total_pages = page.total_pages;
            if !state.can_go_to(state.filters.page) {
                state.filters.page = state.total_pages.saturating_sub(1);
            }
            state.status = ConsoleStatus::Loaded;
        }
        ConsoleAction::LoadFailed { request, message } => {
            if !is_current(&state, request) {
                tracing::debug!(request, "Discarding stale load failure");
                return state;
            }
            state.notifications.clear();
            state.status = ConsoleStatus::Error(message);
        }
        ConsoleAction::StatusFilterChanged(status) => {
            if state.filters.status != status {
                state.filters.status = status;
                state.filters.page = 0;
            }
        }
        ConsoleAction::TypeFilterChanged(kind) => {
            if state.filters.notification_type != kind {
                state.filters.notification_type = kind;
                state.filters.page = 0;
            }
        }
        ConsoleAction::PageRequested(page) => {
            if state.can_go_to(page) {
                state.filters.page = page;
            }
        }
        ConsoleAction::MutationStarted => {
            state.busy = true;
        }
        ConsoleAction::NotificationUpdated(updated) => {
            state.busy = false;
            if let Some(slot) = state.notifications.iter_mut().find(|n| n.id == updated.id) {
                *slot = updated;
            }
        }
        ConsoleAction::NotificationDeleted { message, .. } => {
            state.busy = false;
            state.flash = Some(Flash::Success(message));
        }
        ConsoleAction::AllMarkedRead { at, message } => {
            state.busy = false;
            for n in state.notifications.iter_mut().filter(|n| !n.is_read) {
                n.is_read = true;
                n.read_at = Some(at);
            }
            state.flash = Some(Flash::Success(message));
        }
        ConsoleAction::MutationFailed(message) => {
            state.busy = false;
            state.flash = Some(Flash::Error(message));
        }
        ConsoleAction::FlashDismissed => {
            state.flash = None;
        }
    }
    state
}

/// Admin notifications console: drives [`reduce`] from service calls.
pub struct NotificationsConsole {
    service: NotificationService,
    user_id: UserId,
    state: ConsoleState,
}

impl NotificationsConsole {
    pub fn new(service: NotificationService, user_id: UserId) -> Self {
        let config = service.api().config();
        let filters = NotificationFilters {
            size: config.notifications_page_size,
            sort: config.notifications_sort.clone(),
            ..Default::default()
        };

        Self {
            service,
            user_id,
            state: ConsoleState::with_filters(filters),
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn dispatch(&mut self, action: ConsoleAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Feed a finished load into the state. Stale tags are ignored.
    pub fn complete_load(&mut self, request: u64, result: AppResult<NotificationPage>) {
        match result {
            Ok(page) => self.dispatch(ConsoleAction::PageLoaded { request, page }),
            Err(e) => {
                tracing::warn!("Failed to load notifications: {}", e);
                self.dispatch(ConsoleAction::LoadFailed {
                    request,
                    message: e.user_message().to_string(),
                });
            }
        }
    }

    async fn fetch(&mut self) {
        self.dispatch(ConsoleAction::LoadRequested);
        let Some(request) = self.state.pending_request() else {
            return;
        };
        let filters = self.state.filters.clone();
        let result = self.service.list(self.user_id, &filters).await;
        self.complete_load(request, result);
    }

    /// Load the current page. If the page no longer exists (for example after
    /// deleting the last item of the last page) the index is clamped and the
    /// clamped page is loaded.
    pub async fn load(&mut self) {
        let requested = self.state.filters.page;
        self.fetch().await;
        if self.state.status == ConsoleStatus::Loaded && self.state.filters.page != requested {
            self.fetch().await;
        }
    }

    async fn apply_filter_change(&mut self, action: ConsoleAction) {
        let before = self.state.filters.clone();
        self.dispatch(action);
        if self.state.filters != before {
            self.load().await;
        }
    }

    pub async fn set_status_filter(&mut self, status: StatusFilter) {
        self.apply_filter_change(ConsoleAction::StatusFilterChanged(status))
            .await;
    }

    pub async fn set_type_filter(&mut self, kind: Option<NotificationType>) {
        self.apply_filter_change(ConsoleAction::TypeFilterChanged(kind))
            .await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.apply_filter_change(ConsoleAction::PageRequested(page))
            .await;
    }

    pub async fn next_page(&mut self) {
        if self.state.can_go_next() {
            self.go_to_page(self.state.filters.page + 1).await;
        }
    }

    pub async fn previous_page(&mut self) {
        if self.state.can_go_previous() {
            self.go_to_page(self.state.filters.page - 1).await;
        }
    }

    pub async fn refresh(&mut self) {
        self.load().await;
    }

    /// Returns false when another mutation is still in flight.
    fn begin_mutation(&mut self) -> bool {
        if self.state.busy {
            return false;
        }
        self.dispatch(ConsoleAction::MutationStarted);
        true
    }

    fn mutation_failed(&mut self, err: crate::error::AppError) {
        tracing::warn!("Notification update failed: {}", err);
        self.dispatch(ConsoleAction::MutationFailed(err.user_message().to_string()));
    }

    pub async fn mark_read(&mut self, id: NotificationId) {
        if !self.begin_mutation() {
            return;
        }
        match self.service.mark_read(id).await {
            Ok(updated) => self.dispatch(ConsoleAction::NotificationUpdated(updated)),
            Err(e) => self.mutation_failed(e),
        }
    }

    pub async fn mark_unread(&mut self, id: NotificationId) {
        if !self.begin_mutation() {
            return;
        }
        match self.service.mark_unread(id).await {
            Ok(updated) => self.dispatch(ConsoleAction::NotificationUpdated(updated)),
            Err(e) => self.mutation_failed(e),
        }
    }

    pub async fn delete(&mut self, id: NotificationId) {
        if !self.begin_mutation() {
            return;
        }
        match self.service.delete(id).await {
            Ok(()) => {
                let message = self.service.api().messages().notification_deleted().to_string();
                self.dispatch(ConsoleAction::NotificationDeleted { id, message });
                self.load().await;
            }
            Err(e) => self.mutation_failed(e),
        }
    }

    pub async fn mark_all_read(&mut self) {
        if !self.begin_mutation() {
            return;
        }
        match self.service.mark_all_read_for_user(self.user_id).await {
            Ok(count) => {
                let message = self.service.api().messages().marked_all_read(count);
                self.dispatch(ConsoleAction::AllMarkedRead {
                    at: Utc::now(),
                    message,
                });
            }
            Err(e) => self.mutation_failed(e),
        }
    }
}
