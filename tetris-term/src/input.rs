use console::{Key, Term};
use tetris_engine::Command;

/// Events produced by the keyboard reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

pub fn map_key(key: &Key) -> Option<Input> {
    match key {
        Key::ArrowLeft => Some(Input::Command(Command::MoveLeft)),
        Key::ArrowRight => Some(Input::Command(Command::MoveRight)),
        Key::ArrowDown => Some(Input::Command(Command::SoftDrop)),
        Key::ArrowUp | Key::Char('x') | Key::Char('X') => Some(Input::Command(Command::Rotate)),
        Key::Char('q') | Key::Char('Q') | Key::Escape => Some(Input::Quit),
        _ => None,
    }
}

/// Read keys on a blocking thread and forward them until quit or the receiver is gone
pub fn spawn_keyboard_reader(sender: flume::Sender<Input>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let term = Term::stdout();
        loop {
            let key = match term.read_key() {
                Ok(key) => key,
                Err(e) => {
                    tracing::warn!("Keyboard read failed: {}", e);
                    let _ = sender.send(Input::Quit);
                    break;
                }
            };
            let Some(input) = map_key(&key) else {
                continue;
            };
            if sender.send(input).is_err() || input == Input::Quit {
                break;
            }
        }
    })
}
