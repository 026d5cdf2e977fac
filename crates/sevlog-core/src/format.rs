//! # Formatter
//!
//! Runtime template rendering: `{}` takes the next argument, `{N}` takes
//! argument `N`, and `{{` / `}}` are literal braces. One template uses either
//! automatic or manual indexing, never both.
//!
//! Unlike `format!`, templates are ordinary strings checked at call time, so
//! mismatches surface as [`LogError::Format`] instead of compile errors.
//!
//! ```rust
//! use sevlog_core::format::render;
//!
//! let line = render("{0} + {1} = {2}", &[&1, &2, &3]).unwrap();
//! assert_eq!(line, "1 + 2 = 3");
//! ```

use std::fmt::{Display, Write};

use crate::error::{LogError, LogResult};

/// Which placeholder style a template has committed to.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Indexing
{
    Undecided,
    Automatic,
    Manual,
}

/// Render `template` against `args`.
///
/// Every argument must be referenced at least once.
///
/// ## Errors
///
/// Returns [`LogError::Format`] on any placeholder/argument mismatch or
/// malformed brace.
pub fn render(template: &str, args: &[&dyn Display]) -> LogResult<String>
{
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut used = vec![false; args.len()];
    let mut next_implicit = 0usize;
    let mut indexing = Indexing::Undecided;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut spec = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    spec.push(inner);
                }
                if !closed {
                    return Err(LogError::format(template, format!("unterminated '{{' at byte {pos}")));
                }

                let index = if spec.is_empty() {
                    if indexing == Indexing::Manual {
                        return Err(LogError::format(
                            template,
                            format!("automatic '{{}}' at byte {pos} after manual indexing"),
                        ));
                    }
                    indexing = Indexing::Automatic;
                    let index = next_implicit;
                    next_implicit += 1;
                    index
                } else {
                    if !spec.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(LogError::format(
                            template,
                            format!("unsupported placeholder '{{{spec}}}' at byte {pos}"),
                        ));
                    }
                    if indexing == Indexing::Automatic {
                        return Err(LogError::format(
                            template,
                            format!("manual '{{{spec}}}' at byte {pos} after automatic indexing"),
                        ));
                    }
                    indexing = Indexing::Manual;
                    spec.parse::<usize>().map_err(|_| {
                        LogError::format(template, format!("placeholder '{{{spec}}}' at byte {pos} is out of range"))
                    })?
                };

                let arg = args.get(index).ok_or_else(|| {
                    LogError::format(
                        template,
                        format!("placeholder {index} has no argument ({} supplied)", args.len()),
                    )
                })?;
                write!(out, "{arg}")
                    .map_err(|_| LogError::format(template, format!("argument {index} failed to format")))?;
                used[index] = true;
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(LogError::format(template, format!("unmatched '}}' at byte {pos}")));
            }
            _ => out.push(c),
        }
    }

    if let Some(unused) = used.iter().position(|u| !u) {
        return Err(LogError::format(template, format!("argument {unused} is never used")));
    }

    Ok(out)
}
