use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;

use crate::{
    domain::{
        admin_state::{AdminState, AdminTab},
        chat::ChatId,
        events::{AppEvent, KeyInput},
        generation::{ImagePayload, RequestId},
        login_form::LoginMode,
        seed::demo_network_logs,
        shell_state::{ActivePane, ImagePrompt, Screen, ShellState},
        store::AppStore,
    },
    imagegen::worker::ImageGenerationPort,
    infra::{
        asset_cache::AssetCache,
        contracts::{AssetFetcher, ExternalOpener},
    },
};

use super::{
    attachments,
    contracts::ShellOrchestrator,
    list_chats, login, manage_users,
    open_image::{self, ImageAccess, OpenImageError},
    send_message::{send_message, SendMessageCommand, SendMessageError},
    settings,
};

const OFFLINE_NOTICE: &str = "You're offline. AI stickers need a connection.";
const NO_CHAT_NOTICE: &str = "Pick a chat first.";

/// Where images are materialized and how they reach the viewer.
pub struct MediaServices<F, O> {
    pub images_dir: PathBuf,
    pub cache: AssetCache,
    pub fetcher: F,
    pub opener: O,
}

impl<F, O> MediaServices<F, O>
where
    F: AssetFetcher,
    O: ExternalOpener,
{
    fn access(&self) -> ImageAccess<'_> {
        ImageAccess {
            images_dir: &self.images_dir,
            cache: &self.cache,
            fetcher: &self.fetcher,
            opener: &self.opener,
        }
    }
}

/// Owns the store and screen state and routes every event to the
/// workflow for the current screen.
pub struct DefaultShellOrchestrator<G, F, O>
where
    G: ImageGenerationPort,
    F: AssetFetcher,
    O: ExternalOpener,
{
    state: ShellState,
    store: AppStore,
    generator: G,
    media: MediaServices<F, O>,
}

impl<G, F, O> DefaultShellOrchestrator<G, F, O>
where
    G: ImageGenerationPort,
    F: AssetFetcher,
    O: ExternalOpener,
{
    pub fn new(store: AppStore, generator: G, media: MediaServices<F, O>) -> Self {
        Self {
            state: ShellState::default(),
            store,
            generator,
            media,
        }
    }

    pub fn screen(&self) -> Screen {
        Screen::for_role(self.store.session.role())
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl && key.key == "c" {
            self.state.stop();
            return;
        }

        match self.screen() {
            Screen::Login => self.handle_login_key(key),
            Screen::Chat => self.handle_chat_key(key),
            Screen::Admin => self.handle_admin_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        let form = &mut self.state.login;
        match key.key.as_str() {
            "tab" => form.toggle_mode(),
            "up" | "down" if form.mode() == LoginMode::User => form.toggle_field(),
            "enter" => self.submit_login(),
            other => {
                form.focused_input_mut().apply_key(other);
            }
        }
    }

    fn submit_login(&mut self) {
        let form = &self.state.login;
        let result = match form.mode() {
            LoginMode::User => login::login_as_user(
                &mut self.store.session,
                form.wifi_ip.text(),
                form.password.text(),
            ),
            LoginMode::Admin => {
                login::login_as_admin(&mut self.store.session, form.admin_password.text())
            }
        };

        match result {
            Ok(()) => self.enter_authenticated_screen(),
            Err(failure) => {
                let form = &mut self.state.login;
                form.set_error(failure.to_string());
                form.password.clear();
                form.admin_password.clear();
            }
        }
    }

    fn enter_authenticated_screen(&mut self) {
        self.state.reset_screens();
        match self.screen() {
            Screen::Chat => self.refresh_chat_list(),
            Screen::Admin => {
                self.state.admin = AdminState::open(
                    self.store.session.credentials(),
                    demo_network_logs(Utc::now()),
                );
            }
            Screen::Login => {}
        }
    }

    fn logout(&mut self) {
        self.close_image_prompt();
        login::logout(&mut self.store.session);
        self.state.reset_screens();
    }

    /// Rebuilds the sidebar. If the active chat is not one of the
    /// viewer's, the most recent one becomes active.
    fn refresh_chat_list(&mut self) {
        let summaries = list_chats::chat_summaries(&self.store.directory);
        let active_listed = self
            .store
            .directory
            .active_chat_id()
            .is_some_and(|active| summaries.iter().any(|chat| &chat.chat_id == active));

        if !active_listed {
            if let Some(first) = summaries.first() {
                self.store.directory.select_chat(&first.chat_id);
            }
        }

        self.state
            .chat
            .chat_list
            .sync(summaries, self.store.directory.active_chat_id());
    }

    fn handle_chat_key(&mut self, key: KeyInput) {
        self.state.chat.notice = None;

        if self.state.chat.image_prompt.is_some() {
            self.handle_image_prompt_key(key);
            return;
        }

        if key.ctrl {
            if key.key == "l" {
                self.logout();
            }
            return;
        }

        match self.state.chat.active_pane {
            ActivePane::ChatList => self.handle_chat_list_key(&key.key),
            ActivePane::MessageInput => self.handle_message_input_key(&key.key),
        }
    }

    fn handle_chat_list_key(&mut self, key: &str) {
        match key {
            "j" | "down" => self.move_selection(true),
            "k" | "up" => self.move_selection(false),
            "i" | "enter" => self.state.chat.active_pane = ActivePane::MessageInput,
            "g" => self.open_image_prompt(),
            "o" => {
                let result =
                    open_image::open_latest_image(&self.store.directory, &self.media.access());
                self.report_open(result);
            }
            "p" => {
                let result =
                    open_image::open_partner_avatar(&self.store.directory, &self.media.access());
                self.report_open(result);
            }
            "L" => self.logout(),
            "q" => self.state.stop(),
            _ => {}
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let list = &self.state.chat.chat_list;
        let target = if forward {
            list.next_chat_id()
        } else {
            list.previous_chat_id()
        };
        let target = target.cloned();

        if let Some(chat_id) = target {
            self.store.directory.select_chat(&chat_id);
            self.refresh_chat_list();
        }
    }

    fn handle_message_input_key(&mut self, key: &str) {
        match key {
            "esc" => self.state.chat.active_pane = ActivePane::ChatList,
            "enter" => self.submit_message(),
            other => {
                self.state.chat.message_input.apply_key(other);
            }
        }
    }

    fn submit_message(&mut self) {
        let Some(chat_id) = self.selected_chat_id() else {
            self.state.chat.notice = Some(NO_CHAT_NOTICE.to_owned());
            return;
        };
        let sender_id = self.store.directory.current_user_id().clone();
        let input = self.state.chat.message_input.text().to_owned();

        let command = match attachments::parse_image_command(&input) {
            Some(path) => match attachments::load_image_attachment(Path::new(path)) {
                Ok(payload) => SendMessageCommand::image(chat_id, sender_id, &payload),
                Err(error) => {
                    tracing::warn!(error = %error, "attachment rejected");
                    self.state.chat.notice = Some(error.to_string());
                    return;
                }
            },
            None => SendMessageCommand::text(chat_id, sender_id, input),
        };

        match send_message(&mut self.store.directory, command, Utc::now()) {
            Ok(_) => {
                self.state.chat.message_input.clear();
                self.refresh_chat_list();
            }
            Err(SendMessageError::EmptyMessage) => {}
            Err(error) => {
                tracing::warn!(error = %error, "message rejected");
                self.state.chat.notice = Some(error.to_string());
            }
        }
    }

    fn selected_chat_id(&self) -> Option<ChatId> {
        self.state
            .chat
            .chat_list
            .selected_chat()
            .map(|chat| chat.chat_id.clone())
    }

    fn report_open(&mut self, result: Result<PathBuf, OpenImageError>) {
        self.state.chat.notice = Some(match result {
            Ok(path) => format!("Opened {}", path.display()),
            Err(error) => {
                tracing::warn!(error = %error, "image could not be opened");
                error.to_string()
            }
        });
    }

    fn open_image_prompt(&mut self) {
        if let Some(reason) = self.generator.unavailable_reason() {
            self.state.chat.notice = Some(reason.to_owned());
            return;
        }
        if !self.state.connectivity_status().is_online() {
            self.state.chat.notice = Some(OFFLINE_NOTICE.to_owned());
            return;
        }
        if self.selected_chat_id().is_none() {
            self.state.chat.notice = Some(NO_CHAT_NOTICE.to_owned());
            return;
        }

        self.state.chat.image_prompt = Some(ImagePrompt::default());
    }

    fn handle_image_prompt_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "esc" => self.close_image_prompt(),
            "enter" => self.submit_image_prompt(),
            other => {
                if let Some(prompt) = self.state.chat.image_prompt.as_mut() {
                    prompt.prompt.apply_key(other);
                }
            }
        }
    }

    /// Closes the modal and aborts its in-flight request, if any.
    fn close_image_prompt(&mut self) {
        if let Some(mut prompt) = self.state.chat.image_prompt.take() {
            if let Some(request_id) = prompt.tracker.cancel() {
                self.generator.cancel(request_id);
            }
        }
    }

    fn submit_image_prompt(&mut self) {
        let online = self.state.connectivity_status().is_online();
        let Some(prompt) = self.state.chat.image_prompt.as_mut() else {
            return;
        };

        if let Some(payload) = prompt.tracker.ready_payload().cloned() {
            self.state.chat.image_prompt = None;
            self.send_generated_image(payload);
            return;
        }

        let text = prompt.prompt.text().trim().to_owned();
        if text.is_empty() || prompt.tracker.is_pending() {
            return;
        }
        if !online {
            self.state.chat.notice = Some(OFFLINE_NOTICE.to_owned());
            return;
        }

        let request_id = self.state.request_ids.allocate();
        if let Some(previous) = prompt.tracker.begin(request_id) {
            self.generator.cancel(previous);
        }
        self.generator.submit(request_id, text);
    }

    fn send_generated_image(&mut self, payload: ImagePayload) {
        let Some(chat_id) = self.selected_chat_id() else {
            self.state.chat.notice = Some(NO_CHAT_NOTICE.to_owned());
            return;
        };
        let sender_id = self.store.directory.current_user_id().clone();
        let command = SendMessageCommand::image(chat_id, sender_id, &payload);

        match send_message(&mut self.store.directory, command, Utc::now()) {
            Ok(_) => self.refresh_chat_list(),
            Err(error) => {
                tracing::warn!(error = %error, "generated image rejected");
                self.state.chat.notice = Some(error.to_string());
            }
        }
    }

    fn apply_generation_result(
        &mut self,
        request_id: RequestId,
        result: Result<ImagePayload, String>,
    ) {
        let applied = self
            .state
            .chat
            .image_prompt
            .as_mut()
            .is_some_and(|prompt| prompt.tracker.complete(request_id, result));

        if !applied {
            tracing::debug!(
                request_id = request_id.value(),
                "stale image generation result discarded"
            );
        }
    }

    fn handle_admin_key(&mut self, key: KeyInput) {
        let tab = self.state.admin.tab();

        if key.ctrl {
            match key.key.as_str() {
                "l" => self.logout(),
                "d" if tab == AdminTab::Users => self.delete_selected_user(),
                _ => {}
            }
            return;
        }

        if key.key == "tab" {
            self.state.admin.next_tab();
            return;
        }

        match tab {
            AdminTab::Settings => self.handle_settings_key(&key.key),
            AdminTab::Users => self.handle_users_key(&key.key),
            AdminTab::Chats => self.handle_admin_chats_key(&key.key),
            AdminTab::NetworkLogs => self.handle_admin_readonly_key(&key.key),
        }
    }

    fn handle_settings_key(&mut self, key: &str) {
        let admin = &mut self.state.admin;
        match key {
            "up" | "down" => admin.toggle_settings_field(),
            "enter" => {
                let wifi_ip = admin.settings_ip.text().to_owned();
                let password = admin.settings_password.text().to_owned();
                settings::save_settings(&mut self.store.session, &wifi_ip, &password);
                self.state.reset_screens();
            }
            other => {
                admin.focused_settings_input_mut().apply_key(other);
            }
        }
    }

    fn handle_users_key(&mut self, key: &str) {
        let users_len = manage_users::manageable_users(&self.store.directory).len();
        match key {
            "up" => self.state.admin.move_user_cursor(-1, users_len),
            "down" => self.state.admin.move_user_cursor(1, users_len),
            "enter" => {
                let name = self.state.admin.new_user_name.take();
                if manage_users::add_user(&mut self.store.directory, &name).is_none() {
                    self.state.admin.new_user_name.set_text(&name);
                }
            }
            other => {
                self.state.admin.new_user_name.apply_key(other);
            }
        }
    }

    fn delete_selected_user(&mut self) {
        let users = manage_users::manageable_users(&self.store.directory);
        if let Some(user) = users.get(self.state.admin.user_cursor()) {
            manage_users::delete_user(&mut self.store.directory, &user.id);
        }

        let users_len = manage_users::manageable_users(&self.store.directory).len();
        let chats_len = list_chats::admin_chat_rows(&self.store.directory).len();
        self.state.admin.clamp_cursors(users_len, chats_len);
    }

    fn handle_admin_chats_key(&mut self, key: &str) {
        if self.state.admin.viewing_chat().is_some() {
            if key == "esc" {
                self.state.admin.close_chat_view();
            }
            return;
        }

        let rows = list_chats::admin_chat_rows(&self.store.directory);
        match key {
            "up" | "k" => self.state.admin.move_chat_cursor(-1, rows.len()),
            "down" | "j" => self.state.admin.move_chat_cursor(1, rows.len()),
            "enter" => {
                if let Some(row) = rows.into_iter().nth(self.state.admin.chat_cursor()) {
                    self.state.admin.view_chat(row.chat_id);
                }
            }
            other => self.handle_admin_readonly_key(other),
        }
    }

    fn handle_admin_readonly_key(&mut self, key: &str) {
        match key {
            "L" => self.logout(),
            "q" => self.state.stop(),
            _ => {}
        }
    }
}

impl<G, F, O> ShellOrchestrator for DefaultShellOrchestrator<G, F, O>
where
    G: ImageGenerationPort,
    F: AssetFetcher,
    O: ExternalOpener,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn store(&self) -> &AppStore {
        &self.store
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::ConnectivityChanged(status) => {
                self.state.set_connectivity_status(status);
            }
            AppEvent::ImageGenerated { request_id, result } => {
                self.apply_generation_result(request_id, result);
            }
        }

        Ok(())
    }
}
