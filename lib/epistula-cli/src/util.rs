use crate::args::BodyArgs;
use miette::IntoDiagnostic;
use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;
use tokio::fs;

#[inline]
pub fn error_kaomoji() -> impl Display {
    "(┬┬﹏┬┬)".if_supports_color(Stream::Stdout, |text| text.red())
}

#[inline]
pub fn success_kaomoji() -> impl Display {
    "(^///^)".if_supports_color(Stream::Stdout, |text| text.green())
}

/// Resolve the body from either the inline argument or the file, defaulting to an empty body
pub async fn read_body(args: BodyArgs) -> miette::Result<Vec<u8>> {
    match (args.body, args.body_file) {
        (Some(body), _) => Ok(body.into_bytes()),
        (None, Some(path)) => fs::read(path).await.into_diagnostic(),
        (None, None) => Ok(Vec::new()),
    }
}
