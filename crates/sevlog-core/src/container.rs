//! # Container Rendering
//!
//! Stringification for the `*_stream` operations. A value is first classified
//! into one of four shapes, then rendered:
//!
//! | Shape        | Output                    |
//! |--------------|---------------------------|
//! | `Mapping`    | `{{k1: v1}, {k2: v2}}`    |
//! | `Sequence`   | `[e1, e2]`                |
//! | `Enumerated` | the ordinal, e.g. `2`     |
//! | `Scalar`     | the value's `Display`     |
//!
//! Classification happens through [`IntoContainer`], implemented for the std
//! collections: map types become `Mapping`, every other collection becomes
//! `Sequence`. Enums opt in through [`Ordinal`].
//!
//! An element whose `Display` implementation fails renders as
//! [`UNRENDERABLE`] instead of aborting the call.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use sevlog_core::container::IntoContainer;
//!
//! let map = BTreeMap::from([("a", 1), ("b", 2)]);
//! assert_eq!(map.into_container().render(), "{{a: 1}, {b: 2}}");
//! assert_eq!(vec![1, 2, 3].into_container().render(), "[1, 2, 3]");
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt::{self, Display, Write};

use tracing::debug;

/// Placeholder for a value whose `Display` implementation returned an error.
pub const UNRENDERABLE: &str = "<unrenderable>";

fn display_text(value: impl Display) -> String
{
    let mut text = String::new();
    match write!(text, "{value}") {
        Ok(()) => text,
        Err(_) => {
            debug!(partial = %text, "container element failed to format");
            UNRENDERABLE.to_string()
        }
    }
}

/// A value classified for rendering. Elements are pre-rendered strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container
{
    /// Key/value entries, in iteration order
    Mapping(Vec<(String, String)>),
    /// Elements, in iteration order
    Sequence(Vec<String>),
    /// Underlying ordinal of an enumerated value
    Enumerated(i64),
    /// Any single displayable value
    Scalar(String),
}

impl Container
{
    /// Classify a single displayable value.
    pub fn scalar(value: impl Display) -> Self
    {
        Self::Scalar(display_text(value))
    }

    /// Classify an enumerated value by its ordinal.
    pub fn enumerated(value: &impl Ordinal) -> Self
    {
        Self::Enumerated(value.ordinal())
    }

    /// Classify any iterator of displayable items as a sequence.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        Self::Sequence(items.into_iter().map(display_text).collect())
    }

    /// Classify any iterator of displayable pairs as a mapping.
    pub fn mapping<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Display,
    {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (display_text(k), display_text(v)))
                .collect(),
        )
    }

    /// Render to the shape's textual form.
    #[must_use]
    pub fn render(&self) -> String
    {
        self.to_string()
    }
}

impl Display for Container
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{{{key}: {value}}}")?;
                }
                f.write_str("}")
            }
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(item)?;
                }
                f.write_str("]")
            }
            Self::Enumerated(ordinal) => write!(f, "{ordinal}"),
            Self::Scalar(text) => f.write_str(text),
        }
    }
}

/// Enumerations that render by their underlying integer value.
///
/// ```rust
/// use sevlog_core::container::{Container, Ordinal};
///
/// #[derive(Clone, Copy)]
/// #[repr(u8)]
/// enum Colors { Red, Green, Blue }
///
/// impl Ordinal for Colors
/// {
///     fn ordinal(&self) -> i64
///     {
///         i64::from(*self as u8)
///     }
/// }
///
/// assert_eq!(Container::enumerated(&Colors::Blue).render(), "2");
/// ```
pub trait Ordinal
{
    /// Underlying integer value of the variant.
    fn ordinal(&self) -> i64;
}

/// Conversion into a classified [`Container`].
pub trait IntoContainer
{
    /// Classify `self`.
    fn into_container(self) -> Container;
}

impl IntoContainer for Container
{
    fn into_container(self) -> Container
    {
        self
    }
}

impl<T: Display> IntoContainer for Vec<T>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display> IntoContainer for &Vec<T>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display> IntoContainer for &[T]
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display, const N: usize> IntoContainer for [T; N]
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display, const N: usize> IntoContainer for &[T; N]
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display> IntoContainer for VecDeque<T>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display> IntoContainer for &VecDeque<T>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display> IntoContainer for LinkedList<T>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display> IntoContainer for &LinkedList<T>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display, S> IntoContainer for HashSet<T, S>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display, S> IntoContainer for &HashSet<T, S>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display> IntoContainer for BTreeSet<T>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<T: Display> IntoContainer for &BTreeSet<T>
{
    fn into_container(self) -> Container
    {
        Container::sequence(self)
    }
}

impl<K: Display, V: Display, S> IntoContainer for HashMap<K, V, S>
{
    fn into_container(self) -> Container
    {
        Container::mapping(self)
    }
}

impl<K: Display, V: Display, S> IntoContainer for &HashMap<K, V, S>
{
    fn into_container(self) -> Container
    {
        Container::mapping(self)
    }
}

impl<K: Display, V: Display> IntoContainer for &BTreeMap<K, V>
{
    fn into_container(self) -> Container
    {
        Container::mapping(self)
    }
}

impl<K: Display, V: Display> IntoContainer for BTreeMap<K, V>
{
    fn into_container(self) -> Container
    {
        Container::mapping(self)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[derive(Clone, Copy)]
    #[repr(i32)]
    enum Colors
    {
        Red,
        Green,
        Blue = 7,
    }

    impl Ordinal for Colors
    {
        fn ordinal(&self) -> i64
        {
            i64::from(*self as i32)
        }
    }

    #[test]
    fn test_sequence_rendering()
    {
        assert_eq!(vec![1, 2, 3, 4, 5].into_container().render(), "[1, 2, 3, 4, 5]");
        assert_eq!(Vec::<i32>::new().into_container().render(), "[]");
        assert_eq!(["solo"].into_container().render(), "[solo]");
    }

    #[test]
    fn test_mapping_rendering()
    {
        let map = BTreeMap::from([("one", 1), ("three", 3), ("two", 2)]);
        assert_eq!((&map).into_container().render(), "{{one: 1}, {three: 3}, {two: 2}}");
        assert_eq!(BTreeMap::<String, i32>::new().into_container().render(), "{}");
    }

    #[test]
    fn test_hash_map_entry_count()
    {
        let map: HashMap<i32, &str> = HashMap::from([(1, "one"), (2, "two"), (3, "three")]);
        let rendered = (&map).into_container().render();
        assert!(rendered.starts_with('{') && rendered.ends_with('}'));
        assert_eq!(rendered.matches("}, {").count(), 2);
        assert!(rendered.contains("{2: two}"));
        assert!(!rendered.ends_with(", }"));
    }

    #[test]
    fn test_sets_render_as_sequences()
    {
        let set = BTreeSet::from([30, 10, 20]);
        assert_eq!((&set).into_container().render(), "[10, 20, 30]");

        let deque = VecDeque::from(vec!['a', 'b']);
        assert_eq!((&deque).into_container().render(), "[a, b]");
    }

    #[test]
    fn test_owned_collections_classify()
    {
        let map = HashMap::from([(1, "one")]);
        assert_eq!(map.into_container().render(), "{{1: one}}");
        assert_eq!(HashSet::from([4]).into_container().render(), "[4]");
        assert_eq!(BTreeSet::from([2, 1]).into_container().render(), "[1, 2]");
        assert_eq!(VecDeque::from(vec![1, 2]).into_container().render(), "[1, 2]");
        assert_eq!(LinkedList::from([3]).into_container().render(), "[3]");
    }

    struct Failing;

    impl Display for Failing
    {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
        {
            f.write_str("partial")?;
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_failing_elements_do_not_panic()
    {
        let rendered = Container::sequence([&1 as &dyn Display, &Failing]).render();
        assert_eq!(rendered, format!("[1, {UNRENDERABLE}]"));
        assert_eq!(Container::mapping([("k", Failing)]).render(), format!("{{{{k: {UNRENDERABLE}}}}}"));
        assert_eq!(Container::scalar(Failing).render(), UNRENDERABLE);
    }

    #[test]
    fn test_enumerated_uses_ordinal()
    {
        assert_eq!(Container::enumerated(&Colors::Red).render(), "0");
        assert_eq!(Container::enumerated(&Colors::Green).render(), "1");
        assert_eq!(Container::enumerated(&Colors::Blue).render(), "7");
    }

    #[test]
    fn test_scalar_fallback()
    {
        assert_eq!(Container::scalar(3.5).render(), "3.5");
        assert_eq!(Container::scalar("text").render(), "text");
    }
}
