use crate::error::CommandError;
use crate::layout::LayoutKind;

use winsys::input::Button;
use winsys::input::Modifier;

use std::str::FromStr;

use strum_macros::EnumString;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString)]
enum Keyword {
    #[strum(serialize = "win", serialize = "window")]
    Window,
    #[strum(serialize = "set")]
    Set,
    #[strum(serialize = "ws", serialize = "workspace")]
    Workspace,
    #[strum(serialize = "wm", serialize = "manager")]
    Manager,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString)]
enum WindowKeyword {
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "focus")]
    Focus,
    #[strum(serialize = "kill")]
    Kill,
    #[strum(serialize = "move")]
    Move,
    #[strum(serialize = "swap")]
    Swap,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString)]
enum SetKeyword {
    #[strum(serialize = "gap")]
    Gap,
    #[strum(serialize = "border")]
    Border,
    #[strum(serialize = "split")]
    Split,
    #[strum(serialize = "master")]
    Master,
    #[strum(serialize = "stack")]
    Stack,
    #[strum(serialize = "layout")]
    Layout,
    #[strum(serialize = "mouse")]
    Mouse,
    #[strum(serialize = "focus_mouse")]
    FocusMouse,
}

/// Option words; recognised anywhere among a command's arguments.
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumString)]
enum Opt {
    #[strum(serialize = "absolute")]
    Absolute,
    #[strum(serialize = "reset")]
    Reset,
    #[strum(serialize = "next")]
    Next,
    #[strum(serialize = "prev")]
    Prev,
    #[strum(serialize = "width")]
    Width,
    #[strum(serialize = "colour", serialize = "color")]
    Colour,
    #[strum(serialize = "smart")]
    Smart,
    #[strum(serialize = "focus")]
    Focus,
    #[strum(serialize = "unfocus")]
    Unfocus,
    #[strum(serialize = "view")]
    View,
    #[strum(serialize = "send")]
    Send,
    #[strum(serialize = "follow")]
    Follow,
    #[strum(serialize = "reload")]
    Reload,
    #[strum(serialize = "restart")]
    Restart,
    #[strum(serialize = "exit")]
    Exit,
    #[strum(serialize = "mod")]
    Mod,
    #[strum(serialize = "move")]
    Move,
    #[strum(serialize = "resize")]
    Resize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Amount<T> {
    Relative(T),
    Absolute(T),
    Reset,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindowCommand {
    Float,
    Focus(i32),
    Kill,
    Move(i32),
    Swap,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorTarget {
    Reset,
    Focus(u32),
    Unfocus(u32),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SetCommand {
    Gap(Amount<i32>),
    BorderWidth(Amount<i32>),
    BorderColor(ColorTarget),
    BorderSmart(bool),
    Split(Amount<f32>),
    Master(Amount<i32>),
    Stack(Amount<i32>),
    Layout(LayoutKind),
    Mouse {
        modifier: Option<Modifier>,
        move_button: Option<Button>,
        resize_button: Option<Button>,
    },
    FocusMouse(bool),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WorkspaceAction {
    View,
    Send,
    Follow,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ManagerCommand {
    Reload,
    Restart,
    Exit,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    Window(WindowCommand),
    Set(SetCommand),
    Workspace(WorkspaceAction, usize),
    Manager(ManagerCommand),
}

/// Splits a command line into tokens. Space, tab, `=` and line breaks
/// separate tokens; double quotes group with `\"` escapes, single quotes
/// group literally. An unterminated quote ends the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut in_token = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' | '=' | '\n' | '\r' => {
                if in_token {
                    tokens.push(std::mem::take(&mut token));
                    in_token = false;
                }
            },
            '"' => {
                in_token = true;
                let mut closed = false;

                while let Some(c) = chars.next() {
                    match c {
                        '\\' => match chars.next() {
                            Some('"') => token.push('"'),
                            Some(c) => {
                                token.push('\\');
                                token.push(c);
                            },
                            None => break,
                        },
                        '"' => {
                            closed = true;
                            break;
                        },
                        c => token.push(c),
                    }
                }

                if !closed {
                    return tokens;
                }
            },
            '\'' => {
                in_token = true;
                let mut closed = false;

                for c in &mut chars {
                    if c == '\'' {
                        closed = true;
                        break;
                    }

                    token.push(c);
                }

                if !closed {
                    return tokens;
                }
            },
            c => {
                in_token = true;
                token.push(c);
            },
        }
    }

    if in_token {
        tokens.push(token);
    }

    tokens
}

/// Parses every command on a line, in order. Parsing stops at the first
/// malformed command, which is returned as the last element.
pub fn parse(line: &str) -> Vec<Result<Command, CommandError>> {
    let line = line.trim_start();

    if line.is_empty() || line.starts_with('#') {
        return Vec::with_capacity(0);
    }

    let tokens = tokenize(line);
    let mut commands = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let keyword = match Keyword::from_str(&tokens[i]) {
            Ok(keyword) => keyword,
            Err(_) => {
                commands.push(Err(CommandError::Unknown(tokens[i].to_owned())));
                break;
            },
        };

        let start = i + 1;
        let mut end = start;

        while end < tokens.len() && Keyword::from_str(&tokens[end]).is_err() {
            end += 1;
        }

        let args: Vec<&str> = tokens[start..end].iter().map(String::as_str).collect();
        let command = parse_command(keyword, &tokens[i], &args);
        let failed = command.is_err();

        commands.push(command);

        if failed {
            break;
        }

        i = end;
    }

    commands
}

fn parse_command(
    keyword: Keyword,
    token: &str,
    args: &[&str],
) -> Result<Command, CommandError> {
    match keyword {
        Keyword::Window => parse_window(token, args).map(Command::Window),
        Keyword::Set => parse_set(token, args).map(Command::Set),
        Keyword::Workspace => parse_workspace(token, args),
        Keyword::Manager => parse_manager(token, args).map(Command::Manager),
    }
}

#[inline]
fn invalid(token: &str) -> CommandError {
    CommandError::Invalid(token.to_owned())
}

fn parse_window(
    token: &str,
    args: &[&str],
) -> Result<WindowCommand, CommandError> {
    let (&sub, rest) = args.split_first().ok_or_else(|| invalid(token))?;

    let keyword = WindowKeyword::from_str(sub).map_err(|_| invalid(sub))?;

    match keyword {
        WindowKeyword::Focus => parse_steps(sub, rest).map(WindowCommand::Focus),
        WindowKeyword::Move => parse_steps(sub, rest).map(WindowCommand::Move),
        _ if !rest.is_empty() => Err(CommandError::Unknown(rest[0].to_owned())),
        WindowKeyword::Float => Ok(WindowCommand::Float),
        WindowKeyword::Kill => Ok(WindowCommand::Kill),
        WindowKeyword::Swap => Ok(WindowCommand::Swap),
    }
}

fn parse_steps(
    token: &str,
    args: &[&str],
) -> Result<i32, CommandError> {
    for &arg in args {
        match Opt::from_str(arg) {
            Ok(Opt::Next) => return Ok(1),
            Ok(Opt::Prev) => return Ok(-1),
            _ => {},
        }

        if let Some(n) = parse_int(arg).filter(|&n| n != 0) {
            return Ok(n);
        }
    }

    Err(invalid(args.first().copied().unwrap_or(token)))
}

fn parse_set(
    token: &str,
    args: &[&str],
) -> Result<SetCommand, CommandError> {
    let (&sub, rest) = args.split_first().ok_or_else(|| invalid(token))?;

    match SetKeyword::from_str(sub).map_err(|_| invalid(sub))? {
        SetKeyword::Gap => parse_amount(sub, rest, true, parse_int).map(SetCommand::Gap),
        SetKeyword::Master => parse_amount(sub, rest, false, parse_int).map(SetCommand::Master),
        SetKeyword::Stack => parse_amount(sub, rest, false, parse_int).map(SetCommand::Stack),
        SetKeyword::Split => parse_amount(sub, rest, false, parse_float).map(SetCommand::Split),
        SetKeyword::Border => parse_border(sub, rest),
        SetKeyword::Layout => rest
            .first()
            .ok_or_else(|| invalid(sub))
            .and_then(|&name| LayoutKind::from_str(name).map_err(|_| invalid(name)))
            .map(SetCommand::Layout),
        SetKeyword::Mouse => parse_mouse(sub, rest),
        SetKeyword::FocusMouse => rest
            .first()
            .ok_or_else(|| invalid(sub))
            .and_then(|&value| parse_bool(value).ok_or_else(|| invalid(value)))
            .map(SetCommand::FocusMouse),
    }
}

/// Reads a numeric argument along with the `absolute` and, if
/// `resettable`, `reset` options, in any order.
fn parse_amount<T>(
    token: &str,
    args: &[&str],
    resettable: bool,
    parse_value: fn(&str) -> Option<T>,
) -> Result<Amount<T>, CommandError> {
    let mut absolute = false;
    let mut value = None;

    for &arg in args {
        match Opt::from_str(arg) {
            Ok(Opt::Reset) if resettable => return Ok(Amount::Reset),
            Ok(Opt::Absolute) => absolute = true,
            _ => match parse_value(arg) {
                Some(v) if value.is_none() => value = Some(v),
                _ => return Err(invalid(arg)),
            },
        }
    }

    match value {
        Some(value) if absolute => Ok(Amount::Absolute(value)),
        Some(value) => Ok(Amount::Relative(value)),
        None => Err(invalid(token)),
    }
}

fn parse_border(
    token: &str,
    args: &[&str],
) -> Result<SetCommand, CommandError> {
    let (&sub, rest) = args.split_first().ok_or_else(|| invalid(token))?;

    match Opt::from_str(sub) {
        Ok(Opt::Width) => parse_amount(sub, rest, true, parse_int).map(SetCommand::BorderWidth),
        Ok(Opt::Smart) => rest
            .first()
            .ok_or_else(|| invalid(sub))
            .and_then(|&value| parse_bool(value).ok_or_else(|| invalid(value)))
            .map(SetCommand::BorderSmart),
        Ok(Opt::Colour) => {
            let (&target, rest) = rest.split_first().ok_or_else(|| invalid(sub))?;

            let color = || {
                rest.first()
                    .ok_or_else(|| invalid(target))
                    .and_then(|&value| parse_color(value).ok_or_else(|| invalid(value)))
            };

            match Opt::from_str(target) {
                Ok(Opt::Reset) => Ok(SetCommand::BorderColor(ColorTarget::Reset)),
                Ok(Opt::Focus) => Ok(SetCommand::BorderColor(ColorTarget::Focus(color()?))),
                Ok(Opt::Unfocus) => Ok(SetCommand::BorderColor(ColorTarget::Unfocus(color()?))),
                _ => Err(invalid(target)),
            }
        },
        _ => Err(invalid(sub)),
    }
}

fn parse_mouse(
    token: &str,
    args: &[&str],
) -> Result<SetCommand, CommandError> {
    let mut modifier = None;
    let mut move_button = None;
    let mut resize_button = None;
    let mut args = args.iter();

    while let Some(&arg) = args.next() {
        let value = args.next().copied().ok_or_else(|| invalid(arg))?;

        match Opt::from_str(arg) {
            Ok(Opt::Mod) => {
                modifier = Some(match Modifier::from_str(value) {
                    Ok(Modifier::Shift) | Err(_) => return Err(invalid(value)),
                    Ok(modifier) => modifier,
                })
            },
            Ok(Opt::Move) => {
                move_button = Some(Button::from_str(value).map_err(|_| invalid(value))?)
            },
            Ok(Opt::Resize) => {
                resize_button = Some(Button::from_str(value).map_err(|_| invalid(value))?)
            },
            _ => return Err(invalid(arg)),
        }
    }

    if modifier.is_none() && move_button.is_none() && resize_button.is_none() {
        return Err(invalid(token));
    }

    Ok(SetCommand::Mouse {
        modifier,
        move_button,
        resize_button,
    })
}

fn parse_workspace(
    token: &str,
    args: &[&str],
) -> Result<Command, CommandError> {
    let mut action = WorkspaceAction::View;
    let mut number = None;

    for &arg in args {
        match Opt::from_str(arg) {
            Ok(Opt::View) => action = WorkspaceAction::View,
            Ok(Opt::Send) => action = WorkspaceAction::Send,
            Ok(Opt::Follow) => action = WorkspaceAction::Follow,
            _ => match parse_int(arg) {
                Some(n) if n >= 1 => number = Some(n as usize),
                _ => return Err(invalid(arg)),
            },
        }
    }

    number
        .map(|n| Command::Workspace(action, n - 1))
        .ok_or_else(|| invalid(token))
}

fn parse_manager(
    token: &str,
    args: &[&str],
) -> Result<ManagerCommand, CommandError> {
    let &arg = args.first().ok_or_else(|| invalid(token))?;

    match Opt::from_str(arg) {
        Ok(Opt::Reload) => Ok(ManagerCommand::Reload),
        Ok(Opt::Restart) => Ok(ManagerCommand::Restart),
        Ok(Opt::Exit) => Ok(ManagerCommand::Exit),
        _ => Err(invalid(arg)),
    }
}

/// Integers with an optional sign, in decimal or with a `0x` prefix.
pub fn parse_int(value: &str) -> Option<i32> {
    let (negative, digits) = match value.as_bytes().first()? {
        b'-' => (true, &value[1..]),
        b'+' => (false, &value[1..]),
        _ => (false, value),
    };

    let n = if digits.starts_with("0x") || digits.starts_with("0X") {
        i32::from_str_radix(&digits[2..], 16).ok()?
    } else {
        digits.parse::<i32>().ok()?
    };

    Some(if negative { -n } else { n })
}

pub fn parse_float(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|f| f.is_finite())
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Parses `RRGGBB` or `AARRGGBB`, optionally prefixed with `#` or `0x`,
/// into an ARGB pixel. Translucent colours are premultiplied by their alpha.
pub fn parse_color(value: &str) -> Option<u32> {
    let digits = value
        .strip_prefix('#')
        .or_else(|| value.strip_prefix("0x"))
        .unwrap_or(value);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let color = u32::from_str_radix(digits, 16).ok()?;

    match digits.len() {
        6 => Some(color | 0xff00_0000),
        8 => {
            let alpha = color >> 24;

            if alpha == 0 || alpha == 0xff {
                return Some(color);
            }

            let premultiply = |shift: u32| (((color & (0xff << shift)) >> shift) * alpha / 0xff) << shift;
            Some((alpha << 24) | premultiply(16) | premultiply(8) | premultiply(0))
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_quotes_and_separators() {
        assert_eq!(tokenize("set  gap=5\n"), vec!["set", "gap", "5"]);
        assert_eq!(
            tokenize(r#"win "a \"b\" c" 'd "e'"#),
            vec!["win", r#"a "b" c"#, r#"d "e"#]
        );
        assert_eq!(tokenize("set layout \"tile"), vec!["set", "layout"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        assert!(parse("# set gap 5").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("   \n").is_empty());
    }

    #[test]
    fn gap_is_relative_unless_absolute() {
        assert_eq!(parse("set gap 5"), vec![Ok(Command::Set(SetCommand::Gap(Amount::Relative(5))))]);
        assert_eq!(
            parse("set gap absolute 5"),
            vec![Ok(Command::Set(SetCommand::Gap(Amount::Absolute(5))))]
        );
        assert_eq!(
            parse("set gap 5 absolute"),
            vec![Ok(Command::Set(SetCommand::Gap(Amount::Absolute(5))))]
        );
        assert_eq!(parse("set gap reset"), vec![Ok(Command::Set(SetCommand::Gap(Amount::Reset)))]);
        assert_eq!(
            parse("set gap -3"),
            vec![Ok(Command::Set(SetCommand::Gap(Amount::Relative(-3))))]
        );
    }

    #[test]
    fn chained_commands() {
        assert_eq!(parse("win float set layout monocle ws follow 3"), vec![
            Ok(Command::Window(WindowCommand::Float)),
            Ok(Command::Set(SetCommand::Layout(LayoutKind::Monocle))),
            Ok(Command::Workspace(WorkspaceAction::Follow, 2)),
        ]);
    }

    #[test]
    fn parsing_stops_at_first_error() {
        assert_eq!(parse("win kill set gap 5 frob win swap"), vec![
            Ok(Command::Window(WindowCommand::Kill)),
            Err(CommandError::Invalid("frob".to_owned())),
        ]);

        assert_eq!(parse("win kill bogus"), vec![Err(CommandError::Unknown(
            "bogus".to_owned()
        ))]);

        assert_eq!(parse("frob win kill"), vec![Err(CommandError::Unknown(
            "frob".to_owned()
        ))]);

        assert_eq!(parse("set layout spiral win swap"), vec![Err(CommandError::Invalid(
            "spiral".to_owned()
        ))]);

        assert_eq!(
            parse("set gap").pop().map(|result| result.map_err(|e| e.to_string())),
            Some(Err("!invalid argument: gap".to_owned()))
        );
    }

    #[test]
    fn focus_and_move_steps() {
        assert_eq!(parse("win focus next"), vec![Ok(Command::Window(WindowCommand::Focus(1)))]);
        assert_eq!(parse("window focus prev"), vec![Ok(Command::Window(WindowCommand::Focus(-1)))]);
        assert_eq!(parse("win move -2"), vec![Ok(Command::Window(WindowCommand::Move(-2)))]);
        assert!(parse("win move 0")[0].is_err());
    }

    #[test]
    fn workspace_numbers_count_from_one() {
        assert_eq!(parse("ws 1"), vec![Ok(Command::Workspace(WorkspaceAction::View, 0))]);
        assert_eq!(parse("workspace 4 send"), vec![Ok(Command::Workspace(
            WorkspaceAction::Send,
            3
        ))]);
        assert!(parse("ws 0")[0].is_err());
        assert!(parse("ws view")[0].is_err());
    }

    #[test]
    fn border_subcommands() {
        assert_eq!(
            parse("set border width absolute 3"),
            vec![Ok(Command::Set(SetCommand::BorderWidth(Amount::Absolute(3))))]
        );
        assert_eq!(
            parse("set border colour focus #6699cc"),
            vec![Ok(Command::Set(SetCommand::BorderColor(ColorTarget::Focus(0xff6699cc))))]
        );
        assert_eq!(
            parse("set border color reset"),
            vec![Ok(Command::Set(SetCommand::BorderColor(ColorTarget::Reset)))]
        );
        assert_eq!(parse("set border smart 0"), vec![Ok(Command::Set(SetCommand::BorderSmart(
            false
        )))]);
        assert_eq!(
            parse("set border colour unfocus 336699"),
            vec![Ok(Command::Set(SetCommand::BorderColor(ColorTarget::Unfocus(0xff336699))))]
        );
        assert!(parse("set border colour focus #zz99cc")[0].is_err());
    }

    #[test]
    fn mouse_settings() {
        assert_eq!(parse("set mouse mod super resize button2"), vec![Ok(Command::Set(
            SetCommand::Mouse {
                modifier: Some(Modifier::Super),
                move_button: None,
                resize_button: Some(Button::Middle),
            }
        ))]);

        assert!(parse("set mouse mod shift")[0].is_err());
        assert!(parse("set mouse move")[0].is_err());
    }

    #[test]
    fn split_and_counts() {
        assert_eq!(
            parse("set split -0.05"),
            vec![Ok(Command::Set(SetCommand::Split(Amount::Relative(-0.05))))]
        );
        assert_eq!(
            parse("set master absolute 2"),
            vec![Ok(Command::Set(SetCommand::Master(Amount::Absolute(2))))]
        );
        assert!(parse("set stack reset")[0].is_err());
    }

    #[test]
    fn manager_commands() {
        assert_eq!(parse("wm exit"), vec![Ok(Command::Manager(ManagerCommand::Exit))]);
        assert_eq!(parse("manager restart"), vec![Ok(Command::Manager(ManagerCommand::Restart))]);
        assert!(parse("wm")[0].is_err());
    }

    #[test]
    fn colors() {
        assert_eq!(parse_color("#000000"), Some(0xff000000));
        assert_eq!(parse_color("0xffffff"), Some(0xffffffff));
        assert_eq!(parse_color("#80ffffff"), Some(0x80808080));
        assert_eq!(parse_color("#00123456"), Some(0x00123456));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("123456"), Some(0xff123456));
        assert_eq!(parse_color("80ffffff"), Some(0x80808080));
        assert_eq!(parse_color("0x1234567"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn integers() {
        assert_eq!(parse_int("+5"), Some(5));
        assert_eq!(parse_int("-0x10"), Some(-16));
        assert_eq!(parse_int("five"), None);
        assert_eq!(parse_int(""), None);
    }
}
