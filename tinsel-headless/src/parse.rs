//! This module handles parsing commands typed on stdin.

use crate::Command;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_until1, take_while1},
    character::complete::{self, multispace0, multispace1},
    combinator::{all_consuming, map_res},
    number::complete::float,
    IResult, Parser,
};
use std::str::FromStr;
use tinsel_formations::SceneMode;

/// Parse a whole line of input as a command. Surrounding whitespace is ignored.
pub fn parse_command(input: &str) -> IResult<&str, Command<'_>> {
    all_consuming(
        alt((
            parse_move.map(|(x, y)| Command::Move(x, y)),
            tag("click").map(|_| Command::Click),
            parse_mode.map(Command::Mode),
            parse_photo.map(Command::Photo),
            parse_resize.map(|(width, height)| Command::Resize(width, height)),
            tag("hide").map(|_| Command::Hide),
            tag("quit").map(|_| Command::Quit),
        ))
        .and(multispace0)
        .map(|(command, _)| command),
    )(input.trim_start())
}

/// Parse a `move` command. See [`Command::Move`].
fn parse_move(input: &str) -> IResult<&str, (f32, f32)> {
    let (input, _) = tag("move")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    Ok((input, (x, y)))
}

/// Parse a `mode` command. See [`Command::Mode`].
fn parse_mode(input: &str) -> IResult<&str, SceneMode> {
    let (input, _) = tag("mode")(input)?;
    let (input, _) = multispace1(input)?;
    map_res(take_while1(|c: char| c.is_ascii_alphabetic()), SceneMode::from_str)(input)
}

/// Parse a `photo` command. See [`Command::Photo`].
///
/// The path can be bare, or wrapped in single or double quotes if it has spaces in it.
fn parse_photo(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag("photo")(input)?;
    let (input, _) = multispace1(input)?;
    alt((
        tag("\"")
            .and(take_until1("\""))
            .and(tag("\""))
            .map(|((_, path), _)| path),
        tag("'")
            .and(take_until1("'"))
            .and(tag("'"))
            .map(|((_, path), _)| path),
        take_while1(|c: char| !c.is_whitespace()),
    ))(input)
}

/// Parse a `resize` command. See [`Command::Resize`].
fn parse_resize(input: &str) -> IResult<&str, (u32, u32)> {
    let (input, _) = tag("resize")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, width) = complete::u32(input)?;
    let (input, _) = multispace1(input)?;
    let (input, height) = complete::u32(input)?;
    Ok((input, (width, height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Option<Command<'_>> {
        parse_command(input).ok().map(|(_, command)| command)
    }

    #[test]
    fn parse_command_test() {
        assert_eq!(parse("move 100 250.5"), Some(Command::Move(100., 250.5)));
        assert_eq!(parse("  click  "), Some(Command::Click));
        assert_eq!(parse("mode scatter"), Some(Command::Mode(SceneMode::Scatter)));
        assert_eq!(parse("mode FOCUS"), Some(Command::Mode(SceneMode::Focus)));
        assert_eq!(parse("mode Tree\n"), Some(Command::Mode(SceneMode::Tree)));
        assert_eq!(
            parse("photo /tmp/cat.png"),
            Some(Command::Photo("/tmp/cat.png"))
        );
        assert_eq!(
            parse("photo \"/tmp/my cat.png\""),
            Some(Command::Photo("/tmp/my cat.png"))
        );
        assert_eq!(
            parse("photo '/tmp/my dog.jpg'"),
            Some(Command::Photo("/tmp/my dog.jpg"))
        );
        assert_eq!(parse("resize 1920 1080"), Some(Command::Resize(1920, 1080)));
        assert_eq!(parse("hide"), Some(Command::Hide));
        assert_eq!(parse("quit"), Some(Command::Quit));
    }

    #[test]
    fn parse_command_rejects_junk() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("mode spiral"), None);
        assert_eq!(parse("move 1"), None);
        assert_eq!(parse("resize -1 20"), None);
        assert_eq!(parse("click twice"), None);
        assert_eq!(parse("photo"), None);
    }
}
