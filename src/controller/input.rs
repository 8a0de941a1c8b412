//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::PlayerController;

impl PlayerController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let (queue_visible, library_visible) = {
            let session = self.session.lock().await;
            (session.queue_visible, session.library_visible)
        };

        if library_visible {
            let handled = match key.code {
                KeyCode::Up => {
                    self.move_library_selection(-1).await;
                    true
                }
                KeyCode::Down => {
                    self.move_library_selection(1).await;
                    true
                }
                KeyCode::Enter => {
                    self.play_library_selected().await;
                    true
                }
                KeyCode::Char('o') => {
                    self.open_library_selected().await;
                    true
                }
                KeyCode::Char('a') => {
                    self.enqueue_library_selected().await;
                    true
                }
                KeyCode::Char('n') => {
                    self.play_library_selected_next().await;
                    true
                }
                KeyCode::Tab => {
                    self.toggle_library_source().await;
                    true
                }
                KeyCode::Esc => {
                    self.toggle_library_visible().await;
                    true
                }
                _ => false,
            };
            if handled {
                return Ok(());
            }
        }

        // Up-next list navigation only applies while the list is shown
        if queue_visible {
            match key.code {
                KeyCode::Up => {
                    self.move_selection(-1).await;
                    return Ok(());
                }
                KeyCode::Down => {
                    self.move_selection(1).await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    self.play_selected().await;
                    return Ok(());
                }
                KeyCode::Delete | KeyCode::Char('d') => {
                    self.remove_selected().await;
                    return Ok(());
                }
                KeyCode::Esc => {
                    self.toggle_queue_visible().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.set_should_quit(true).await,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.set_should_quit(true).await
            }
            KeyCode::Char(' ') => self.toggle_playback().await,
            KeyCode::Char('n') | KeyCode::Right => self.next_song().await,
            KeyCode::Char('p') | KeyCode::Left => self.previous_song().await,
            KeyCode::Char('s') => self.toggle_shuffle().await,
            KeyCode::Char('r') => self.cycle_repeat().await,
            KeyCode::Char('u') => self.toggle_queue_visible().await,
            KeyCode::Char('l') => self.toggle_library_visible().await,
            KeyCode::Char('f') => self.toggle_favorite().await,
            KeyCode::Esc => self.close().await,
            _ => {}
        }
        Ok(())
    }
}
