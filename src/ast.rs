use std::{
    fmt::{self, Display, Formatter, Write as _},
    str::FromStr,
};

/// Number of spaces a nested block is indented by when rendering.
const INDENT_WIDTH: usize = 4;

/// The root of a parsed robot program.
///
/// A program is a non-empty, ordered sequence of statements. It is built once
/// by the parser and only handed out by shared reference afterwards, so the
/// same tree can be executed against any number of fresh robots.
///
/// Rendering a program with `Display` produces source text that parses back
/// into an equal tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    /// Builds a program from its top-level statements.
    ///
    /// Returns `None` when `statements` is empty, since a program needs at
    /// least one statement.
    ///
    /// ## Example
    /// ```
    /// use robolang::ast::{Action, Program, Statement};
    ///
    /// assert!(Program::new(Vec::new()).is_none());
    ///
    /// let program = Program::new(vec![Statement::Action(Action::TurnLeft)]).unwrap();
    /// assert_eq!(program.to_string(), "turnL;\n");
    /// ```
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Option<Self> {
        if statements.is_empty() {
            None
        } else {
            Some(Self { statements })
        }
    }

    /// The top-level statements, in source order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// A braced, non-empty sequence of statements.
///
/// Blocks are the bodies of `loop`, `while` and both branches of `if`. An
/// empty block is rejected by the parser, so every block holds at least one
/// statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    statements: Vec<Statement>,
}

impl Block {
    /// Builds a block, or returns `None` if `statements` is empty.
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Option<Self> {
        if statements.is_empty() {
            None
        } else {
            Some(Self { statements })
        }
    }

    /// The statements of this block, in source order.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

/// A single statement.
///
/// Statements keep the source-level boundaries of the program: an action
/// terminated by `;`, or one of the three compound constructs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// A robot command followed by `;`.
    Action(Action),
    /// `loop { ... }`: repeats its body until the run is aborted.
    Loop(Block),
    /// `if (cond) { ... } else { ... }`.
    If(IfStatement),
    /// `while (cond) { ... }`.
    While(WhileStatement),
}

/// A conditional statement with an optional `else` branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatement {
    /// The condition, evaluated exactly once per execution.
    pub condition:  Condition,
    /// Executed when the condition holds.
    pub then_block: Block,
    /// Executed when the condition does not hold, if present.
    pub else_block: Option<Block>,
}

/// A pre-tested loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStatement {
    /// Re-evaluated before every iteration.
    pub condition: Condition,
    /// The loop body.
    pub body:      Block,
}

/// A robot command.
///
/// `Move` and `Wait` optionally carry an operand (distance and duration); the
/// evaluated operand is handed to the robot as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `move` or `move(expr)`
    Move(Option<Expression>),
    /// `turnL`
    TurnLeft,
    /// `turnR`
    TurnRight,
    /// `turnAround`
    TurnAround,
    /// `shieldOn`
    ShieldOn,
    /// `shieldOff`
    ShieldOff,
    /// `takeFuel`
    TakeFuel,
    /// `wait` or `wait(expr)`
    Wait(Option<Expression>),
}

impl Action {
    /// The keyword that introduces this action in source text.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Move(_) => "move",
            Self::TurnLeft => "turnL",
            Self::TurnRight => "turnR",
            Self::TurnAround => "turnAround",
            Self::ShieldOn => "shieldOn",
            Self::ShieldOff => "shieldOff",
            Self::TakeFuel => "takeFuel",
            Self::Wait(_) => "wait",
        }
    }

    /// The operand of a `move` or `wait`, if one was written.
    #[must_use]
    pub const fn operand(&self) -> Option<&Expression> {
        match self {
            Self::Move(operand) | Self::Wait(operand) => operand.as_ref(),
            _ => None,
        }
    }
}

/// A boolean condition used by `if` and `while`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `and(left, right)`
    And(Box<Self>, Box<Self>),
    /// `or(left, right)`
    Or(Box<Self>, Box<Self>),
    /// `not(inner)`
    Not(Box<Self>),
    /// `lt(a, b)`, `gt(a, b)` or `eq(a, b)`.
    Relational {
        /// The comparison to apply.
        op:    RelOp,
        /// Left-hand operand.
        left:  Expression,
        /// Right-hand operand.
        right: Expression,
    },
}

/// An integer-valued expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A signed integer literal such as `42` or `-3`.
    Number(i64),
    /// `add(l, r)`, `sub(l, r)`, `mul(l, r)` or `div(l, r)`.
    BinaryOp {
        /// The arithmetic operator.
        op:    ArithOp,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// A sensor reading, resolved against the robot at evaluation time.
    Sensor(Sensor),
}

/// Error returned when a word is not the keyword of the expected kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKeyword(pub String);

/// Declares a keyword enum together with its `FromStr`/`Display` mapping and
/// a table of all variants.
macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The source keyword for this variant.
            #[must_use]
            pub const fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownKeyword;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownKeyword(s.to_string())),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.keyword())
            }
        }
    };
}

keyword_enum! {
    /// A relational operator comparing two integers.
    RelOp {
        /// Less than.
        Lt => "lt",
        /// Greater than.
        Gt => "gt",
        /// Equal to.
        Eq => "eq",
    }
}

keyword_enum! {
    /// An integer arithmetic operator.
    ArithOp {
        /// Addition.
        Add => "add",
        /// Subtraction.
        Sub => "sub",
        /// Multiplication.
        Mul => "mul",
        /// Division, truncating toward zero.
        Div => "div",
    }
}

keyword_enum! {
    /// A read-only robot sensor.
    Sensor {
        /// Fuel remaining.
        FuelLeft => "fuelLeft",
        /// Opponent's position to the left (negative) or right (positive).
        OpponentLR => "oppLR",
        /// Opponent's position behind (negative) or ahead (positive).
        OpponentFB => "oppFB",
        /// Number of barrels currently visible.
        NumBarrels => "numBarrels",
        /// Closest barrel's lateral position.
        BarrelLR => "barrelLR",
        /// Closest barrel's forward position.
        BarrelFB => "barrelFB",
        /// Distance to the nearest wall straight ahead.
        WallDist => "wallDist",
    }
}

fn write_indent(f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth * INDENT_WIDTH {
        f.write_char(' ')?;
    }
    Ok(())
}

impl Block {
    /// Writes `{`, the statements one level deeper, then `}` at `depth`.
    fn fmt_at(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        f.write_str("{\n")?;
        for statement in &self.statements {
            statement.fmt_at(f, depth + 1)?;
        }
        write_indent(f, depth)?;
        f.write_char('}')
    }
}

impl Statement {
    /// Writes this statement on its own line(s), indented to `depth`.
    fn fmt_at(&self, f: &mut Formatter<'_>, depth: usize) -> fmt::Result {
        write_indent(f, depth)?;
        match self {
            Self::Action(action) => write!(f, "{action};")?,
            Self::Loop(body) => {
                f.write_str("loop ")?;
                body.fmt_at(f, depth)?;
            },
            Self::If(IfStatement { condition,
                                   then_block,
                                   else_block, }) => {
                write!(f, "if ({condition}) ")?;
                then_block.fmt_at(f, depth)?;
                if let Some(else_block) = else_block {
                    f.write_str(" else ")?;
                    else_block.fmt_at(f, depth)?;
                }
            },
            Self::While(WhileStatement { condition, body }) => {
                write!(f, "while ({condition}) ")?;
                body.fmt_at(f, depth)?;
            },
        }
        f.write_char('\n')
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            statement.fmt_at(f, 0)?;
        }
        Ok(())
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 0)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())?;
        if let Some(operand) = self.operand() {
            write!(f, "({operand})")?;
        }
        Ok(())
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(left, right) => write!(f, "and({left}, {right})"),
            Self::Or(left, right) => write!(f, "or({left}, {right})"),
            Self::Not(inner) => write!(f, "not({inner})"),
            Self::Relational { op, left, right } => write!(f, "{op}({left}, {right})"),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::BinaryOp { op, left, right } => write!(f, "{op}({left}, {right})"),
            Self::Sensor(sensor) => write!(f, "{sensor}"),
        }
    }
}
