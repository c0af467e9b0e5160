//! A tiny comparison language for availability conditions.
//!
//! A condition is exactly three parts: `<operand> <operator> <operand>`,
//! split on the first operator found.
//! There is no nesting, no parentheses, no `and`/`or`, and no quoting.
//!
//! Operands are resolved independently:
//! - `$a.b.c` is a path into the world (`$player.level`, `$self.kind`, ...),
//! - a run of ASCII digits is an integer,
//! - anything else is taken verbatim as a string.
//!
//! Evaluation never fails. Paths that lead nowhere resolve to an absent
//! value, which makes every operator `false` except `!=`.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::entity::Entity;
use crate::value::Value;
use crate::world::{Player, WorldState};

/// Why a condition string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// No comparison operator was found.
    #[error("no operator in condition \"{0}\"")]
    MissingOperator(String),

    /// One side of the operator is blank.
    #[error("missing operand in condition \"{0}\"")]
    EmptyOperand(String),
}

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `in` (left is a member of right)
    In,
}

impl Operator {
    /// The operator as written in a condition.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::In => "in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A literal operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// All-digit text.
    Integer(i64),
    /// Any other text.
    String(String),
}

/// One side of a condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A constant.
    Literal(Literal),
    /// A `$`-prefixed dotted path, split into segments.
    Path(Vec<String>),
}

impl Operand {
    fn parse(text: &str) -> Self {
        if let Some(path) = text.strip_prefix('$') {
            return Self::Path(path.split('.').map(str::to_string).collect());
        }
        if text.bytes().all(|b| b.is_ascii_digit())
            && let Ok(n) = text.parse::<i64>()
        {
            return Self::Literal(Literal::Integer(n));
        }
        Self::Literal(Literal::String(text.to_string()))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(Literal::Integer(n)) => write!(f, "{n}"),
            Self::Literal(Literal::String(s)) => write!(f, "{s}"),
            Self::Path(segments) => write!(f, "${}", segments.join(".")),
        }
    }
}

/// A parsed `<left> <op> <right>` comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Left-hand operand.
    pub left: Operand,
    /// The comparison.
    pub op: Operator,
    /// Right-hand operand.
    pub right: Operand,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// Lexer tokens. Only operators matter; everything else is operand text,
/// recovered from the source by span.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("==")]
    Eq,

    #[token("!=")]
    Ne,

    #[token(">=")]
    Ge,

    #[token("<=")]
    Le,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token("=")]
    #[token("!")]
    Stray,

    #[regex(r"[^=!<> \t\r\n]+")]
    Text,
}

/// The first operator in `source`, scanning left to right, with its byte span.
fn first_operator(source: &str) -> Option<(Operator, Range<usize>)> {
    let mut lexer = RawToken::lexer(source);
    while let Some(result) = lexer.next() {
        let op = match result {
            Ok(RawToken::Eq) => Some(Operator::Eq),
            Ok(RawToken::Ne) => Some(Operator::Ne),
            Ok(RawToken::Ge) => Some(Operator::Ge),
            Ok(RawToken::Le) => Some(Operator::Le),
            Ok(RawToken::Gt) => Some(Operator::Gt),
            Ok(RawToken::Lt) => Some(Operator::Lt),
            // `in` only counts as a whole word
            Ok(RawToken::Text) if lexer.slice() == "in" => Some(Operator::In),
            Ok(RawToken::Text | RawToken::Stray) | Err(()) => None,
        };
        if let Some(op) = op {
            return Some((op, lexer.span()));
        }
    }
    None
}

impl Condition {
    /// Parse a condition string.
    ///
    /// Splits on the first operator; everything after it is the right
    /// operand, verbatim apart from surrounding whitespace.
    pub fn parse(source: &str) -> Result<Self, ConditionError> {
        let (op, span) = first_operator(source)
            .ok_or_else(|| ConditionError::MissingOperator(source.to_string()))?;

        let left = source[..span.start].trim();
        let right = source[span.end..].trim();
        if left.is_empty() || right.is_empty() {
            return Err(ConditionError::EmptyOperand(source.to_string()));
        }

        Ok(Self {
            left: Operand::parse(left),
            op,
            right: Operand::parse(right),
        })
    }

    /// Evaluate against the world. Pure; never panics.
    pub fn evaluate(&self, ctx: &EvalContext<'_>) -> bool {
        let left = resolve(&self.left, ctx);
        let right = resolve(&self.right, ctx);
        apply(self.op, left, right)
    }
}

/// Parse and evaluate in one step. Malformed input evaluates to `false`.
pub fn evaluate_str(source: &str, ctx: &EvalContext<'_>) -> bool {
    match Condition::parse(source) {
        Ok(condition) => condition.evaluate(ctx),
        Err(e) => {
            tracing::warn!(condition = source, error = %e, "malformed condition");
            false
        }
    }
}

/// What a condition may read: the world, plus `self` while an entity is
/// being built. The `self` binding exists only for as long as this value.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    world: &'a WorldState,
    this: Option<&'a Entity>,
}

impl<'a> EvalContext<'a> {
    /// A context with no `self` binding.
    pub fn new(world: &'a WorldState) -> Self {
        Self { world, this: None }
    }

    /// Bind `$self` to `entity`.
    pub fn with_self(mut self, entity: &'a Entity) -> Self {
        self.this = Some(entity);
        self
    }
}

/// A resolved operand, borrowing from the condition or the world.
#[derive(Debug, Clone, Copy)]
enum Resolved<'a> {
    Absent,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Str(&'a str),
    List(&'a [Value]),
    Map(&'a BTreeMap<String, Value>),
    Entities(&'a [Entity]),
    Entity(&'a Entity),
    Player(&'a Player),
}

impl<'a> Resolved<'a> {
    fn from_value(value: &'a Value) -> Self {
        match value {
            Value::String(s) => Self::Str(s),
            Value::Integer(n) => Self::Integer(*n),
            Value::Float(n) => Self::Float(*n),
            Value::Boolean(b) => Self::Boolean(*b),
            Value::List(items) => Self::List(items),
            Value::Map(map) => Self::Map(map),
        }
    }

    /// Step one path segment further.
    fn field(self, segment: &str) -> Self {
        match self {
            Self::Player(player) => match segment {
                "alliance" => Self::Str(&player.alliance),
                "level" => Self::Integer(player.level),
                "backpack" => Self::Entities(&player.backpack),
                "equipped" => Self::Entities(&player.equipped),
                _ => Self::Absent,
            },
            Self::Entity(entity) => match segment {
                "name" => Self::Str(&entity.name),
                "kind" => Self::Str(&entity.kind),
                "description" => Self::Str(&entity.description),
                "variant" => Self::Str(entity.variant.as_str()),
                "available" => Self::Boolean(entity.available),
                "attributes" => Self::Map(&entity.attributes),
                "extra" => Self::Map(&entity.extra),
                key => entity
                    .attributes
                    .get(key)
                    .map_or(Self::Absent, Self::from_value),
            },
            Self::Map(map) => map.get(segment).map_or(Self::Absent, Self::from_value),
            Self::List(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i))
                .map_or(Self::Absent, Self::from_value),
            Self::Entities(entities) => segment
                .parse::<usize>()
                .ok()
                .and_then(|i| entities.get(i))
                .map_or(Self::Absent, Self::Entity),
            _ => Self::Absent,
        }
    }
}

fn resolve<'a>(operand: &'a Operand, ctx: &EvalContext<'a>) -> Resolved<'a> {
    match operand {
        Operand::Literal(Literal::Integer(n)) => Resolved::Integer(*n),
        Operand::Literal(Literal::String(s)) => Resolved::Str(s),
        Operand::Path(segments) => resolve_path(segments, ctx),
    }
}

fn resolve_path<'a>(segments: &'a [String], ctx: &EvalContext<'a>) -> Resolved<'a> {
    let Some((root, mut rest)) = segments.split_first() else {
        return Resolved::Absent;
    };
    let start = match root.as_str() {
        "self" => ctx.this.map_or(Resolved::Absent, Resolved::Entity),
        "player" => Resolved::Player(&ctx.world.player),
        "entities" => match rest.split_first() {
            Some((name, tail)) => {
                rest = tail;
                ctx.world.entity(name).map_or(Resolved::Absent, Resolved::Entity)
            }
            None => Resolved::Absent,
        },
        key => ctx.world.var(key).map_or(Resolved::Absent, Resolved::from_value),
    };
    rest.iter().fold(start, |current, segment| current.field(segment))
}

fn apply(op: Operator, left: Resolved<'_>, right: Resolved<'_>) -> bool {
    match op {
        Operator::Eq => equals(left, right),
        Operator::Ne => !equals(left, right),
        Operator::Ge => matches!(compare(left, right), Some(Ordering::Greater | Ordering::Equal)),
        Operator::Le => matches!(compare(left, right), Some(Ordering::Less | Ordering::Equal)),
        Operator::Gt => compare(left, right) == Some(Ordering::Greater),
        Operator::Lt => compare(left, right) == Some(Ordering::Less),
        Operator::In => contains(right, left),
    }
}

/// Equality across resolved types. Absent equals nothing, not even itself.
fn equals(left: Resolved<'_>, right: Resolved<'_>) -> bool {
    use Resolved::*;
    match (left, right) {
        (Integer(a), Integer(b)) => a == b,
        (Integer(a), Float(b)) | (Float(b), Integer(a)) => a as f64 == b,
        (Float(a), Float(b)) => a == b,
        (Boolean(a), Boolean(b)) => a == b,
        (Str(a), Str(b)) => a == b,
        (Entity(e), Str(s)) | (Str(s), Entity(e)) => e.name == s,
        (Entity(a), Entity(b)) => a.id == b.id,
        (List(a), List(b)) => a == b,
        (Map(a), Map(b)) => a == b,
        (Entities(a), Entities(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
        }
        (Player(a), Player(b)) => std::ptr::eq(a, b),
        _ => false,
    }
}

/// Ordering for numbers and strings; `None` for anything else.
fn compare(left: Resolved<'_>, right: Resolved<'_>) -> Option<Ordering> {
    use Resolved::*;
    match (left, right) {
        (Integer(a), Integer(b)) => Some(a.cmp(&b)),
        (Integer(a), Float(b)) => (a as f64).partial_cmp(&b),
        (Float(a), Integer(b)) => a.partial_cmp(&(b as f64)),
        (Float(a), Float(b)) => a.partial_cmp(&b),
        (Str(a), Str(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Membership of `needle` in `haystack`.
fn contains(haystack: Resolved<'_>, needle: Resolved<'_>) -> bool {
    match haystack {
        Resolved::List(items) => items
            .iter()
            .any(|item| equals(needle, Resolved::from_value(item))),
        Resolved::Entities(entities) => entities
            .iter()
            .any(|entity| equals(needle, Resolved::Entity(entity))),
        Resolved::Map(map) => match needle {
            Resolved::Str(key) => map.contains_key(key),
            _ => false,
        },
        Resolved::Str(text) => match needle {
            Resolved::Str(part) => text.contains(part),
            _ => false,
        },
        _ => false,
    }
}
