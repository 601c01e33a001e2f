use crossterm::event::KeyEvent;
use rides_core::auth::me;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// We logged in successfully and got a token
    LoggedIn(String),

    /// We created an account; the server sent a confirmation to show
    SignedUp(String),

    /// The token made it into durable storage
    SavedToken,

    /// The server turned a request down and (maybe) said why
    Rejected(String),

    /// We found out who the saved token belongs to
    GotSession(me::Resp),

    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Something bad happened; show this and move on
    Problem(String),
}
