use crate::valid::Rule;
use std::fmt;
use std::marker::PhantomData;

/// The fields in a form. Implement this with `form_fields!` rather than by
/// hand.
pub trait Fields: Copy + Eq + fmt::Debug + 'static {
    /// Every field, in display (and tab) order
    const ALL: &'static [Self];

    /// Position of this field in `ALL`
    fn index(self) -> usize;

    /// Human-readable name, used as the input's title
    fn label(self) -> &'static str;

    /// How values for this field are validated
    fn rule(self) -> &'static Rule;

    /// Whether the value should be hidden while typing (e.g. passwords)
    fn masked(self) -> bool;

    /// The field that gets focus when a form opens
    fn first() -> Self {
        Self::ALL[0]
    }

    /// Rotate through the fields (e.g. with tab)
    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Rotate through the fields in reverse (e.g. with shift-tab)
    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Create a field enum for a form. Each variant gets a label, a validation
/// rule, and whether its input should be masked:
///
/// ```
/// gram_core::form_fields!(LoginField {
///     Nickname => ("Nickname", gram_core::valid::NICKNAME, false),
///     Password => ("Password", gram_core::valid::PASSWORD, true),
/// });
/// ```
#[macro_export]
macro_rules! form_fields {
    ($name:ident { $($variant:ident => ($label:expr, $rule:expr, $masked:expr)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $crate::form::Fields for $name {
            const ALL: &'static [Self] = &[
                $($name::$variant),+
            ];

            fn index(self) -> usize {
                self as usize
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn rule(self) -> &'static $crate::valid::Rule {
                match self {
                    $(Self::$variant => &$rule),+
                }
            }

            fn masked(self) -> bool {
                match self {
                    $(Self::$variant => $masked),+
                }
            }
        }
    };
}

/// A validation problem with a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError<F> {
    pub field: F,
    pub message: &'static str,
}

/// The state of a form: what's been typed, what's wrong with it, and whatever
/// the server last complained about.
#[derive(Clone)]
pub struct Form<F> {
    /// Current values, indexed by `Fields::index`
    values: Vec<String>,

    /// Messages for fields that failed validation the last time they
    /// changed. Fields nobody has touched yet don't get one.
    errors: Vec<Option<&'static str>>,

    /// The single non-field error slot
    server: Option<String>,

    fields: PhantomData<F>,
}

impl<F: Fields> Form<F> {
    /// An empty form. Since every field is required, it starts out invalid
    /// but without any visible errors.
    pub fn new() -> Self {
        Self {
            values: vec![String::new(); F::ALL.len()],
            errors: vec![None; F::ALL.len()],
            server: None,
            fields: PhantomData,
        }
    }

    /// A form with some values filled in ahead of time. The values are
    /// validated as if they'd been typed.
    pub fn with_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (F, S)>,
        S: Into<String>,
    {
        let mut form = Self::new();

        for (field, value) in values {
            form.change(field, value);
        }

        form
    }

    /// A field's value changed. Re-validates just that field.
    pub fn change(&mut self, field: F, value: impl Into<String>) {
        let value = value.into();
        let idx = field.index();

        self.errors[idx] = field.rule().check(&value).err();
        self.values[idx] = value;
    }

    /// A field gained focus. This clears the server error so someone can try
    /// again after a failed submission, but leaves field errors alone.
    pub fn focus(&mut self, _field: F) {
        self.server = None;
    }

    /// Get the current value of a field
    pub fn value(&self, field: F) -> &str {
        &self.values[field.index()]
    }

    /// Get the current error for a field, if it has one
    pub fn error(&self, field: F) -> Option<&'static str> {
        self.errors[field.index()]
    }

    /// All the field errors currently showing
    pub fn errors(&self) -> impl Iterator<Item = FieldError<F>> + '_ {
        F::ALL.iter().filter_map(|field| {
            self.error(*field).map(|message| FieldError {
                field: *field,
                message,
            })
        })
    }

    /// Whether every field passes its rule right now. This checks the values
    /// directly instead of looking at `errors`, so untouched required fields
    /// count as invalid.
    pub fn is_valid(&self) -> bool {
        F::ALL
            .iter()
            .all(|field| field.rule().accepts(self.value(*field)))
    }

    /// What the server said about the last submission, if anything
    pub fn server_error(&self) -> Option<&str> {
        self.server.as_deref()
    }

    /// Show a server-level error. Field errors are not affected.
    pub fn set_server_error(&mut self, message: String) {
        self.server = Some(message);
    }
}

impl<F: Fields> fmt::Debug for Form<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values = F::ALL.iter().map(|field| {
            let value = if field.masked() {
                "<redacted>"
            } else {
                self.value(*field)
            };

            (field.label(), value)
        });

        f.debug_struct("Form")
            .field("values", &DebugMap(values))
            .field("errors", &self.errors().collect::<Vec<_>>())
            .field("server", &self.server)
            .finish()
    }
}

/// Lets `Form`'s `Debug` print a map without collecting it first
struct DebugMap<I>(I);

impl<I, K, V> fmt::Debug for DebugMap<I>
where
    I: Iterator<Item = (K, V)> + Clone,
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.clone()).finish()
    }
}

impl<F: Fields> Default for Form<F> {
    fn default() -> Self {
        Self::new()
    }
}
