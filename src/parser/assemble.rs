use super::token::{Token, TokenKind};
use crate::commit::{Commit, Footer, FooterSeparator, FooterToken, Scope, Type};
use crate::Error;

/// Fold a token stream, in emission order, into a [`Commit`].
///
/// The first `Err` in the stream aborts assembly; whatever was assembled
/// before it is dropped.
pub(crate) fn assemble<'a, I>(message: &'a str, tokens: I) -> Result<Commit<'a>, Error>
where
    I: IntoIterator<Item = Result<Token<'a>, Error>>,
{
    let mut assembler = Assembler::new(message);
    for token in tokens {
        assembler.push(token?);
    }
    Ok(assembler.finish())
}

#[derive(Debug)]
struct Assembler<'a> {
    message: &'a str,
    ty: &'a str,
    scope: Option<&'a str>,
    exclamation: bool,
    description: &'a str,
    header_end: usize,
    body: Option<&'a str>,
    footers: Vec<Footer<'a>>,
    footer_span: Option<(usize, usize)>,
}

impl<'a> Assembler<'a> {
    fn new(message: &'a str) -> Self {
        Self {
            message,
            ty: "",
            scope: None,
            exclamation: false,
            description: "",
            header_end: 0,
            body: None,
            footers: Vec::new(),
            footer_span: None,
        }
    }

    fn push(&mut self, token: Token<'a>) {
        match token.kind() {
            TokenKind::HeaderType => self.ty = token.text(),
            TokenKind::HeaderScope => self.scope = Some(token.text()),
            TokenKind::Breaking if token.text() == "!" => self.exclamation = true,
            TokenKind::Description => {
                self.description = token.text();
                self.header_end = token.end();
            }
            TokenKind::Body => {
                self.body = Some(token.text().trim()).filter(|body| !body.is_empty());
            }
            TokenKind::Breaking | TokenKind::FooterKey => {
                self.extend_footer(token);
                self.footers.push(Footer::new(
                    FooterToken::new_unchecked(token.text()),
                    FooterSeparator::Value,
                    "",
                ));
            }
            TokenKind::FooterDelim => {
                self.extend_footer(token);
                if let Some(footer) = self.footers.last_mut() {
                    footer.sep = FooterSeparator::from_delimiter(token.text());
                }
            }
            TokenKind::FooterValue => {
                self.extend_footer(token);
                if let Some(footer) = self.footers.last_mut() {
                    footer.value = token.text().trim();
                }
            }
            TokenKind::LeftScopeDelim | TokenKind::RightScopeDelim | TokenKind::DescDelim => {}
        }
    }

    fn extend_footer(&mut self, token: Token<'_>) {
        let (start, _) = self.footer_span.unwrap_or((token.start(), token.end()));
        self.footer_span = Some((start, token.end()));
    }

    fn finish(self) -> Commit<'a> {
        let breaking_description = self
            .footers
            .iter()
            .find(|footer| footer.breaking())
            .map(|footer| footer.value())
            .or_else(|| self.exclamation.then_some(self.description));

        Commit {
            message: self.message,
            header: &self.message[..self.header_end],
            ty: Type::new_unchecked(self.ty),
            scope: self.scope.map(Scope::new_unchecked),
            exclamation: self.exclamation,
            description: self.description,
            body: self.body,
            footer: self
                .footer_span
                .map(|(start, end)| self.message[start..end].trim()),
            breaking: breaking_description.is_some(),
            breaking_description,
            footers: self.footers,
        }
    }
}
