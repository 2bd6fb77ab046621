use std::{
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, ConnectivityStatus, KeyInput},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Merges terminal input with background channels. Channel events win
/// over key polling so results show up without waiting for a key.
pub struct CrosstermEventSource {
    app_events: Receiver<AppEvent>,
    connectivity: Receiver<ConnectivityStatus>,
    app_events_open: bool,
    connectivity_open: bool,
}

impl CrosstermEventSource {
    pub fn new(app_events: Receiver<AppEvent>, connectivity: Receiver<ConnectivityStatus>) -> Self {
        Self {
            app_events,
            connectivity,
            app_events_open: true,
            connectivity_open: true,
        }
    }

    fn next_channel_event(&mut self) -> Option<AppEvent> {
        if self.connectivity_open {
            match self.connectivity.try_recv() {
                Ok(status) => return Some(AppEvent::ConnectivityChanged(status)),
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("connectivity channel closed");
                    self.connectivity_open = false;
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        if self.app_events_open {
            match self.app_events.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("app event channel closed");
                    self.app_events_open = false;
                }
                Err(TryRecvError::Empty) => {}
            }
        }

        None
    }
}

impl AppEventSource for CrosstermEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if let Some(event) = self.next_channel_event() {
            return Ok(Some(event));
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        match event::read()? {
            Event::Key(key) => Ok(map_key_event(key)),
            Event::Resize(_, _) => Ok(Some(AppEvent::Tick)),
            _ => Ok(None),
        }
    }
}

fn map_key_event(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(AppEvent::QuitRequested);
    }

    let name = match key.code {
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => "enter".to_owned(),
        KeyCode::Esc => "esc".to_owned(),
        KeyCode::Tab | KeyCode::BackTab => "tab".to_owned(),
        KeyCode::Backspace => "backspace".to_owned(),
        KeyCode::Delete => "delete".to_owned(),
        KeyCode::Left => "left".to_owned(),
        KeyCode::Right => "right".to_owned(),
        KeyCode::Up => "up".to_owned(),
        KeyCode::Down => "down".to_owned(),
        KeyCode::Home => "home".to_owned(),
        KeyCode::End => "end".to_owned(),
        _ => return None,
    };

    Some(AppEvent::InputKey(KeyInput::new(name, ctrl)))
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn ctrl_c_requests_quit() {
        assert_eq!(
            map_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(AppEvent::QuitRequested)
        );
    }

    #[test]
    fn plain_q_is_a_key_not_a_quit() {
        assert_eq!(
            map_key_event(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(AppEvent::InputKey(KeyInput::new("q", false)))
        );
    }

    #[test]
    fn special_keys_map_to_names() {
        assert_eq!(
            map_key_event(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(AppEvent::InputKey(KeyInput::new("enter", false)))
        );
        assert_eq!(
            map_key_event(press(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            Some(AppEvent::InputKey(KeyInput::new("l", true)))
        );
        assert_eq!(map_key_event(press(KeyCode::F(5), KeyModifiers::NONE)), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Enter, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;

        assert_eq!(map_key_event(key), None);
    }

    #[test]
    fn channel_events_are_drained_before_polling() {
        let (event_tx, event_rx) = mpsc::channel();
        let (status_tx, status_rx) = mpsc::channel();
        let mut source = CrosstermEventSource::new(event_rx, status_rx);

        status_tx
            .send(ConnectivityStatus::Offline)
            .expect("send status");
        event_tx.send(AppEvent::Tick).expect("send event");

        assert_eq!(
            source.next_channel_event(),
            Some(AppEvent::ConnectivityChanged(ConnectivityStatus::Offline))
        );
        assert_eq!(source.next_channel_event(), Some(AppEvent::Tick));
        assert_eq!(source.next_channel_event(), None);
    }

    #[test]
    fn closed_channels_are_skipped() {
        let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
        let (status_tx, status_rx) = mpsc::channel::<ConnectivityStatus>();
        let mut source = CrosstermEventSource::new(event_rx, status_rx);
        drop(event_tx);
        drop(status_tx);

        assert_eq!(source.next_channel_event(), None);
        assert!(!source.app_events_open);
        assert!(!source.connectivity_open);
    }
}
