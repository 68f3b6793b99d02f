//! The closed catalog of operators the expression parser is driven by.
//!
//! Every operator has a [`Shape`] naming the lexemes it is built from and
//! belongs to exactly one precedence [`Level`]. Levels are ordered from the
//! loosest binding (assignment) to the tightest (list). The catalog is one
//! static table grouped by level; an [`Operator`] is its index.

use crate::lex::token::{ LexemeTag, Mark };

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Order,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Shift,
    Term,
    Factor,
    Unary,
    Primary,
    List,
}

impl Level {
    pub const ALL: [Level; 14] = [
        Level::Assignment,
        Level::LogicalOr,
        Level::LogicalAnd,
        Level::Equality,
        Level::Order,
        Level::BitwiseOr,
        Level::BitwiseXor,
        Level::BitwiseAnd,
        Level::Shift,
        Level::Term,
        Level::Factor,
        Level::Unary,
        Level::Primary,
        Level::List,
    ];

    // loosest level an operand nested in brackets may use
    pub const NESTED: Level = Level::LogicalOr;

    pub fn tighter(self) -> Option<Level> {
        Level::ALL.get(self as usize + 1).copied()
    }

    // this level and every tighter one, loosest first
    pub fn and_tighter(self) -> impl Iterator<Item = Level> {
        Level::ALL[self as usize..].iter().copied()
    }

    pub fn operators(self) -> &'static [OperatorDescriptor] {
        let level = self as usize;
        &DESCRIPTORS[LEVEL_STARTS[level]..LEVEL_STARTS[level + 1]]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    // a single lexeme, no operands
    Nullary(LexemeTag),
    // prefix mark, operand
    Prenary(Mark),
    // operand, suffix mark
    Postary(Mark),
    // opener, one operand, closer
    Cirnary(Mark, Mark),
    // operand, infix mark, operand
    Binary(Mark),
    // opener, zero or more operands, closer
    Variary(Mark, Mark),
    // operand, opener, one or more operands, closer
    Multary(Mark, Mark),
}

impl Shape {
    pub fn leading(&self) -> LexemeTag {
        match *self {
            Shape::Nullary(tag) => tag,
            Shape::Prenary(mark)
            | Shape::Postary(mark)
            | Shape::Cirnary(mark, _)
            | Shape::Binary(mark)
            | Shape::Variary(mark, _)
            | Shape::Multary(mark, _) => mark.into(),
        }
    }

    // whether the shape starts an expression rather than extending one
    pub fn is_clean(&self) -> bool {
        matches!(
            self,
            Shape::Nullary(_) | Shape::Prenary(_) | Shape::Cirnary(..) | Shape::Variary(..)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    RemainderAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    AndAssign,
    XorAssign,
    OrAssign,

    LogicalOr,
    LogicalAnd,

    Equal,
    NotEqual,

    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    BitOr,
    BitXor,
    BitAnd,

    ShiftLeft,
    ShiftRight,

    Add,
    Subtract,

    Multiply,
    Divide,
    Remainder,

    Plus,
    Negate,
    Not,
    Complement,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,

    Literal,
    Name,
    Group,
    Call,

    List,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorDescriptor {
    pub operator: Operator,
    pub shape: Shape,
    pub level: Level,
    pub index: usize,
}

const fn op(operator: Operator, shape: Shape, level: Level, index: usize) -> OperatorDescriptor {
    OperatorDescriptor { operator, shape, level, index }
}

use Level as L;
use Operator as O;
use Shape as S;

const LEVEL_STARTS: [usize; 15] = [0, 11, 12, 13, 15, 19, 20, 21, 22, 24, 26, 29, 37, 41, 42];

// in `Operator` order, grouped by level
static DESCRIPTORS: [OperatorDescriptor; Operator::COUNT] = [
    op(O::Assign, S::Binary(Mark::EQ), L::Assignment, 0),
    op(O::AddAssign, S::Binary(Mark::PLUS_EQ), L::Assignment, 1),
    op(O::SubtractAssign, S::Binary(Mark::MINUS_EQ), L::Assignment, 2),
    op(O::MultiplyAssign, S::Binary(Mark::STAR_EQ), L::Assignment, 3),
    op(O::DivideAssign, S::Binary(Mark::SLASH_EQ), L::Assignment, 4),
    op(O::RemainderAssign, S::Binary(Mark::PERCENT_EQ), L::Assignment, 5),
    op(O::ShiftLeftAssign, S::Binary(Mark::SHL_EQ), L::Assignment, 6),
    op(O::ShiftRightAssign, S::Binary(Mark::SHR_EQ), L::Assignment, 7),
    op(O::AndAssign, S::Binary(Mark::AMP_EQ), L::Assignment, 8),
    op(O::XorAssign, S::Binary(Mark::CARET_EQ), L::Assignment, 9),
    op(O::OrAssign, S::Binary(Mark::PIPE_EQ), L::Assignment, 10),

    op(O::LogicalOr, S::Binary(Mark::PIPE_PIPE), L::LogicalOr, 0),

    op(O::LogicalAnd, S::Binary(Mark::AMP_AMP), L::LogicalAnd, 0),

    op(O::Equal, S::Binary(Mark::EQ_EQ), L::Equality, 0),
    op(O::NotEqual, S::Binary(Mark::BANG_EQ), L::Equality, 1),

    op(O::Less, S::Binary(Mark::LT), L::Order, 0),
    op(O::LessEqual, S::Binary(Mark::LE), L::Order, 1),
    op(O::Greater, S::Binary(Mark::GT), L::Order, 2),
    op(O::GreaterEqual, S::Binary(Mark::GE), L::Order, 3),

    op(O::BitOr, S::Binary(Mark::PIPE), L::BitwiseOr, 0),

    op(O::BitXor, S::Binary(Mark::CARET), L::BitwiseXor, 0),

    op(O::BitAnd, S::Binary(Mark::AMP), L::BitwiseAnd, 0),

    op(O::ShiftLeft, S::Binary(Mark::SHL), L::Shift, 0),
    op(O::ShiftRight, S::Binary(Mark::SHR), L::Shift, 1),

    op(O::Add, S::Binary(Mark::PLUS), L::Term, 0),
    op(O::Subtract, S::Binary(Mark::MINUS), L::Term, 1),

    op(O::Multiply, S::Binary(Mark::STAR), L::Factor, 0),
    op(O::Divide, S::Binary(Mark::SLASH), L::Factor, 1),
    op(O::Remainder, S::Binary(Mark::PERCENT), L::Factor, 2),

    op(O::Plus, S::Prenary(Mark::PLUS), L::Unary, 0),
    op(O::Negate, S::Prenary(Mark::MINUS), L::Unary, 1),
    op(O::Not, S::Prenary(Mark::BANG), L::Unary, 2),
    op(O::Complement, S::Prenary(Mark::TILDE), L::Unary, 3),
    op(O::PreIncrement, S::Prenary(Mark::PLUS_PLUS), L::Unary, 4),
    op(O::PreDecrement, S::Prenary(Mark::MINUS_MINUS), L::Unary, 5),
    op(O::PostIncrement, S::Postary(Mark::PLUS_PLUS), L::Unary, 6),
    op(O::PostDecrement, S::Postary(Mark::MINUS_MINUS), L::Unary, 7),

    op(O::Literal, S::Nullary(LexemeTag::DECIMAL), L::Primary, 0),
    op(O::Name, S::Nullary(LexemeTag::ID), L::Primary, 1),
    op(O::Group, S::Cirnary(Mark::LPAREN, Mark::RPAREN), L::Primary, 2),
    op(O::Call, S::Multary(Mark::LPAREN, Mark::RPAREN), L::Primary, 3),

    op(O::List, S::Variary(Mark::LBRACKET, Mark::RBRACKET), L::List, 0),
];

impl Operator {
    pub const COUNT: usize = 42;

    pub fn at(level: Level, index: usize) -> Option<Operator> {
        level.operators().get(index).map(|d| d.operator)
    }

    pub fn descriptor(self) -> &'static OperatorDescriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn shape(self) -> Shape {
        self.descriptor().shape
    }

    pub fn level(self) -> Level {
        self.descriptor().level
    }

    pub fn all() -> impl Iterator<Item = Operator> {
        DESCRIPTORS.iter().map(|d| d.operator)
    }

    // whether an expression may begin with this tag
    pub fn starts_expression(tag: LexemeTag) -> bool {
        DESCRIPTORS
            .iter()
            .any(|d| d.shape.is_clean() && d.shape.leading() == tag)
    }

    pub fn is_assignment(self) -> bool {
        self.level() == Level::Assignment
    }

    pub fn symbol(self) -> &'static str {
        match self.shape() {
            Shape::Nullary(LexemeTag::DECIMAL) => "literal",
            Shape::Nullary(_) => "name",
            Shape::Postary(_) if self == Operator::PostIncrement => "post++",
            Shape::Postary(_) => "post--",
            Shape::Prenary(mark) | Shape::Binary(mark) => mark.spelling(),
            Shape::Cirnary(..) => "()",
            Shape::Multary(..) => "call",
            Shape::Variary(..) => "list",
        }
    }
}
