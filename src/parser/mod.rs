//! A hand-written lexer and assembler for conventional commit messages.
//!
//! ```text
//! message ──▶ Cursor ──▶ Tokens (state graph) ──▶ assemble ──▶ Commit
//! ```
//!
//! The lexer is a pull-based iterator, so the synchronous parse simply folds
//! it. The pipelined parse runs the same lexer on a producer thread feeding a
//! bounded queue instead; both produce identical results.

mod assemble;
mod cursor;
mod lexer;
mod token;

use std::sync::mpsc;
use std::thread;

pub use lexer::Tokens;
pub use token::{Token, TokenKind};

pub(crate) use lexer::{BREAKING_ARROW, BREAKING_PHRASE};

use crate::{Commit, Error};

/// Capacity of the queue between the lexer thread and the assembler in
/// [`Commit::parse_pipelined`].
pub const TOKEN_QUEUE_CAPACITY: usize = 10;

/// Lex `message` without assembling a commit.
///
/// Unlike [`crate::parse`], the message is used as given (trailing whitespace is not
/// trimmed).
pub fn tokenize(message: &str) -> Tokens<'_> {
    Tokens::new(message)
}

/// Parse a conventional commit, lexing and assembling on the calling thread.
///
/// Trailing whitespace of `message` is ignored.
pub(crate) fn parse(message: &str) -> Result<Commit<'_>, Error> {
    let message = message.trim_end();
    assemble::assemble(message, Tokens::new(message)).map_err(|err| err.set_context(message))
}

/// Parse a conventional commit with the lexer running on its own thread.
pub(crate) fn parse_pipelined(message: &str) -> Result<Commit<'_>, Error> {
    let message = message.trim_end();
    thread::scope(|scope| {
        let (sender, receiver) = mpsc::sync_channel(TOKEN_QUEUE_CAPACITY);
        scope.spawn(move || {
            for token in Tokens::new(message) {
                // the assembler hung up after an error
                if sender.send(token).is_err() {
                    break;
                }
            }
        });
        assemble::assemble(message, receiver)
    })
    .map_err(|err| err.set_context(message))
}
