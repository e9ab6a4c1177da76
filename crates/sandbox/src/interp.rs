//! Restricted script interpreter.
//!
//! Executes a small expression/assignment language inside an environment
//! that exposes nothing but an allow-list of primitive operations:
//! arithmetic, list literals, comparisons, aggregation builtins, and
//! explicit printing. There is no module system, no filesystem, no network,
//! and no access to the host process. `print` output is captured and
//! returned, never written to the host's streams; the script's result is
//! the final value of the variable `result`.

use std::collections::HashMap;
use std::fmt;

use codecrew_core::{Error, Result};

/// Variable whose final value is reported as the script result.
pub const RESULT_VARIABLE: &str = "result";

fn syntax_error(message: impl Into<String>) -> Error {
    Error::tool_execution(format!("syntax error: {}", message.into()))
}

fn runtime_error(message: impl Into<String>) -> Error {
    Error::tool_execution(message.into())
}

// =============================================================================
// Values
// =============================================================================

/// A value produced by the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    List(Vec<ScriptValue>),
    None,
}

impl ScriptValue {
    fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Int(_) => "int",
            ScriptValue::Float(_) => "float",
            ScriptValue::Str(_) => "str",
            ScriptValue::Bool(_) => "bool",
            ScriptValue::List(_) => "list",
            ScriptValue::None => "none",
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            ScriptValue::Int(v) => *v != 0,
            ScriptValue::Float(v) => *v != 0.0,
            ScriptValue::Str(v) => !v.is_empty(),
            ScriptValue::Bool(v) => *v,
            ScriptValue::List(v) => !v.is_empty(),
            ScriptValue::None => false,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            ScriptValue::Int(v) => Some(*v as f64),
            ScriptValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Quoted form, used inside list rendering.
    fn repr(&self) -> String {
        match self {
            ScriptValue::Str(v) => format!("'{v}'"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Int(v) => write!(f, "{v}"),
            ScriptValue::Float(v) => {
                if v.fract() == 0.0 && v.is_finite() {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            ScriptValue::Str(v) => write!(f, "{v}"),
            ScriptValue::Bool(true) => write!(f, "True"),
            ScriptValue::Bool(false) => write!(f, "False"),
            ScriptValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|item| item.repr()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            ScriptValue::None => write!(f, "None"),
        }
    }
}

impl From<&ScriptValue> for serde_json::Value {
    fn from(value: &ScriptValue) -> Self {
        match value {
            ScriptValue::Int(v) => serde_json::Value::from(*v),
            ScriptValue::Float(v) => {
                serde_json::Number::from_f64(*v).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            ScriptValue::Str(v) => serde_json::Value::from(v.clone()),
            ScriptValue::Bool(v) => serde_json::Value::from(*v),
            ScriptValue::List(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            ScriptValue::None => serde_json::Value::Null,
        }
    }
}

// =============================================================================
// Lexer
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Int(i64),
    Float(f64),
    Str(String),
    True,
    False,
    None,
    And,
    Or,
    Not,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Assign,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Newline,
}

fn lex(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\r' => {
                chars.next();
            }
            '#' => {
                while let Some(&c) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '\n' | ';' => {
                chars.next();
                tokens.push(Token::Newline);
            }
            '0'..='9' => {
                let mut number = String::new();
                let mut is_float = false;
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        number.push(c);
                        chars.next();
                    } else if c == '.' && !is_float {
                        is_float = true;
                        number.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if is_float {
                    let value = number
                        .parse::<f64>()
                        .map_err(|_| syntax_error(format!("invalid number literal '{number}'")))?;
                    tokens.push(Token::Float(value));
                } else {
                    let value = number
                        .parse::<i64>()
                        .map_err(|_| syntax_error(format!("invalid number literal '{number}'")))?;
                    tokens.push(Token::Int(value));
                }
            }
            '"' | '\'' => {
                let quote = c;
                chars.next();
                let mut literal = String::new();
                let mut closed = false;
                while let Some(c) = chars.next() {
                    if c == quote {
                        closed = true;
                        break;
                    }
                    if c == '\\' {
                        match chars.next() {
                            Some('n') => literal.push('\n'),
                            Some('t') => literal.push('\t'),
                            Some('\\') => literal.push('\\'),
                            Some('\'') => literal.push('\''),
                            Some('"') => literal.push('"'),
                            Some(other) => {
                                return Err(syntax_error(format!("unknown escape '\\{other}'")))
                            }
                            Option::None => break,
                        }
                    } else {
                        literal.push(c);
                    }
                }
                if !closed {
                    return Err(syntax_error("unterminated string literal"));
                }
                tokens.push(Token::Str(literal));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(match ident.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    "True" | "true" => Token::True,
                    "False" | "false" => Token::False,
                    "None" | "none" => Token::None,
                    _ => Token::Ident(ident),
                });
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '%' => {
                chars.next();
                tokens.push(Token::Percent);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '[' => {
                chars.next();
                tokens.push(Token::LBracket);
            }
            ']' => {
                chars.next();
                tokens.push(Token::RBracket);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '=' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Eq);
                } else {
                    tokens.push(Token::Assign);
                }
            }
            '!' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Ne);
                } else {
                    return Err(syntax_error("unexpected character '!'"));
                }
            }
            '<' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Le);
                } else {
                    tokens.push(Token::Lt);
                }
            }
            '>' => {
                chars.next();
                if chars.peek() == Some(&'=') {
                    chars.next();
                    tokens.push(Token::Ge);
                } else {
                    tokens.push(Token::Gt);
                }
            }
            other => {
                return Err(syntax_error(format!("unexpected character '{other}'")));
            }
        }
    }

    Ok(tokens)
}

// =============================================================================
// Parser
// =============================================================================

#[derive(Debug, Clone)]
enum Expr {
    Literal(ScriptValue),
    Name(String),
    List(Vec<Expr>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy)]
enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug)]
enum Stmt {
    Assign { name: String, expr: Expr },
    Expr(Expr),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, context: &str) -> Result<()> {
        if self.eat(&token) {
            Ok(())
        } else {
            Err(syntax_error(format!("expected {context}")))
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn parse_program(mut self) -> Result<Vec<Stmt>> {
        let mut statements = Vec::new();
        loop {
            while self.eat(&Token::Newline) {}
            if self.at_end() {
                break;
            }
            statements.push(self.parse_stmt()?);
            if !self.at_end() && !self.eat(&Token::Newline) {
                return Err(syntax_error("expected end of statement"));
            }
        }
        Ok(statements)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        if let Some(Token::Ident(name)) = self.peek() {
            if self.peek_at(1) == Some(&Token::Assign) {
                let name = name.clone();
                self.pos += 2;
                let expr = self.parse_expr()?;
                return Ok(Stmt::Assign { name, expr });
            }
        }
        Ok(Stmt::Expr(self.parse_expr()?))
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_and()?;
        while self.eat(&Token::Or) {
            let rhs = self.parse_and()?;
            lhs = Expr::Binary {
                op: BinaryOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_not()?;
        while self.eat(&Token::And) {
            let rhs = self.parse_not()?;
            lhs = Expr::Binary {
                op: BinaryOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> Result<Expr> {
        if self.eat(&Token::Not) {
            let operand = self.parse_not()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let lhs = self.parse_term()?;
        let op = match self.peek() {
            Some(Token::Eq) => BinaryOp::Eq,
            Some(Token::Ne) => BinaryOp::Ne,
            Some(Token::Lt) => BinaryOp::Lt,
            Some(Token::Le) => BinaryOp::Le,
            Some(Token::Gt) => BinaryOp::Gt,
            Some(Token::Ge) => BinaryOp::Ge,
            _ => return Ok(lhs),
        };
        self.pos += 1;
        let rhs = self.parse_term()?;
        Ok(Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_factor()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Mod,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.eat(&Token::Minus) {
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;
        while self.eat(&Token::LBracket) {
            let index = self.parse_expr()?;
            self.expect(Token::RBracket, "']' after index")?;
            expr = Expr::Index {
                target: Box::new(expr),
                index: Box::new(index),
            };
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.advance() {
            Some(Token::Int(value)) => Ok(Expr::Literal(ScriptValue::Int(value))),
            Some(Token::Float(value)) => Ok(Expr::Literal(ScriptValue::Float(value))),
            Some(Token::Str(value)) => Ok(Expr::Literal(ScriptValue::Str(value))),
            Some(Token::True) => Ok(Expr::Literal(ScriptValue::Bool(true))),
            Some(Token::False) => Ok(Expr::Literal(ScriptValue::Bool(false))),
            Some(Token::None) => Ok(Expr::Literal(ScriptValue::None)),
            Some(Token::Ident(name)) => {
                if self.eat(&Token::LParen) {
                    let mut args = Vec::new();
                    if !self.eat(&Token::RParen) {
                        loop {
                            args.push(self.parse_expr()?);
                            if self.eat(&Token::RParen) {
                                break;
                            }
                            self.expect(Token::Comma, "',' between arguments")?;
                        }
                    }
                    Ok(Expr::Call { name, args })
                } else {
                    Ok(Expr::Name(name))
                }
            }
            Some(Token::LParen) => {
                let expr = self.parse_expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(expr)
            }
            Some(Token::LBracket) => {
                let mut items = Vec::new();
                if !self.eat(&Token::RBracket) {
                    loop {
                        items.push(self.parse_expr()?);
                        if self.eat(&Token::RBracket) {
                            break;
                        }
                        self.expect(Token::Comma, "',' between list items")?;
                    }
                }
                Ok(Expr::List(items))
            }
            Some(other) => Err(syntax_error(format!("unexpected token {other:?}"))),
            Option::None => Err(syntax_error("unexpected end of input")),
        }
    }
}

// =============================================================================
// Evaluator
// =============================================================================

/// Outcome of one script execution.
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    /// Final value of the `result` variable, if the script assigned one.
    pub result: Option<ScriptValue>,
    /// Captured `print` output.
    pub stdout: String,
}

#[derive(Default)]
struct Interpreter {
    vars: HashMap<String, ScriptValue>,
    stdout: String,
}

impl Interpreter {
    fn run(&mut self, statements: &[Stmt]) -> Result<()> {
        for statement in statements {
            match statement {
                Stmt::Assign { name, expr } => {
                    let value = self.eval(expr)?;
                    self.vars.insert(name.clone(), value);
                }
                Stmt::Expr(expr) => {
                    self.eval(expr)?;
                }
            }
        }
        Ok(())
    }

    fn eval(&mut self, expr: &Expr) -> Result<ScriptValue> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Name(name) => self
                .vars
                .get(name)
                .cloned()
                .ok_or_else(|| runtime_error(format!("name '{name}' is not defined"))),
            Expr::List(items) => {
                let values = items
                    .iter()
                    .map(|item| self.eval(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(ScriptValue::List(values))
            }
            Expr::Unary { op, operand } => {
                let value = self.eval(operand)?;
                match op {
                    UnaryOp::Not => Ok(ScriptValue::Bool(!value.is_truthy())),
                    UnaryOp::Neg => match value {
                        ScriptValue::Int(v) => v
                            .checked_neg()
                            .map(ScriptValue::Int)
                            .ok_or_else(|| runtime_error("integer overflow in negation")),
                        ScriptValue::Float(v) => Ok(ScriptValue::Float(-v)),
                        other => Err(runtime_error(format!(
                            "bad operand type for unary -: '{}'",
                            other.type_name()
                        ))),
                    },
                }
            }
            Expr::Binary { op, lhs, rhs } => self.eval_binary(*op, lhs, rhs),
            Expr::Call { name, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>>>()?;
                self.call_builtin(name, values)
            }
            Expr::Index { target, index } => {
                let target = self.eval(target)?;
                let index = self.eval(index)?;
                eval_index(&target, &index)
            }
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<ScriptValue> {
        // Boolean operators short-circuit and yield an operand, Python-style.
        if op == BinaryOp::And {
            let lhs = self.eval(lhs)?;
            return if lhs.is_truthy() { self.eval(rhs) } else { Ok(lhs) };
        }
        if op == BinaryOp::Or {
            let lhs = self.eval(lhs)?;
            return if lhs.is_truthy() { Ok(lhs) } else { self.eval(rhs) };
        }

        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;
        match op {
            BinaryOp::Add => eval_add(lhs, rhs),
            BinaryOp::Sub => eval_arith(lhs, rhs, "-"),
            BinaryOp::Mul => eval_arith(lhs, rhs, "*"),
            BinaryOp::Div => eval_arith(lhs, rhs, "/"),
            BinaryOp::Mod => eval_arith(lhs, rhs, "%"),
            BinaryOp::Eq => Ok(ScriptValue::Bool(values_equal(&lhs, &rhs))),
            BinaryOp::Ne => Ok(ScriptValue::Bool(!values_equal(&lhs, &rhs))),
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
                let ordering = compare_values(&lhs, &rhs)?;
                let holds = match op {
                    BinaryOp::Lt => ordering.is_lt(),
                    BinaryOp::Le => ordering.is_le(),
                    BinaryOp::Gt => ordering.is_gt(),
                    _ => ordering.is_ge(),
                };
                Ok(ScriptValue::Bool(holds))
            }
            BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
        }
    }

    fn call_builtin(&mut self, name: &str, args: Vec<ScriptValue>) -> Result<ScriptValue> {
        match name {
            "print" => {
                let rendered: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
                self.stdout.push_str(&rendered.join(" "));
                self.stdout.push('\n');
                Ok(ScriptValue::None)
            }
            "abs" => {
                let value = one_arg("abs", args)?;
                match value {
                    ScriptValue::Int(v) => v
                        .checked_abs()
                        .map(ScriptValue::Int)
                        .ok_or_else(|| runtime_error("integer overflow in abs()")),
                    ScriptValue::Float(v) => Ok(ScriptValue::Float(v.abs())),
                    other => Err(runtime_error(format!(
                        "abs() requires a number, got '{}'",
                        other.type_name()
                    ))),
                }
            }
            "min" => aggregate("min", args, |ordering| ordering.is_lt()),
            "max" => aggregate("max", args, |ordering| ordering.is_gt()),
            "sum" => {
                let value = one_arg("sum", args)?;
                let items = as_list("sum", &value)?;
                let mut all_ints = true;
                let mut total = 0f64;
                for item in items {
                    match item {
                        ScriptValue::Int(v) => total += *v as f64,
                        ScriptValue::Float(v) => {
                            all_ints = false;
                            total += v;
                        }
                        other => {
                            return Err(runtime_error(format!(
                                "sum() requires numbers, got '{}'",
                                other.type_name()
                            )))
                        }
                    }
                }
                if all_ints {
                    Ok(ScriptValue::Int(total as i64))
                } else {
                    Ok(ScriptValue::Float(total))
                }
            }
            "len" => {
                let value = one_arg("len", args)?;
                match value {
                    ScriptValue::Str(v) => Ok(ScriptValue::Int(v.chars().count() as i64)),
                    ScriptValue::List(v) => Ok(ScriptValue::Int(v.len() as i64)),
                    other => Err(runtime_error(format!(
                        "object of type '{}' has no len()",
                        other.type_name()
                    ))),
                }
            }
            "sorted" => {
                let value = one_arg("sorted", args)?;
                let mut items = as_list("sorted", &value)?.to_vec();
                // Verify homogeneity up front so sort_by can't see an error.
                for window in items.windows(2) {
                    compare_values(&window[0], &window[1])?;
                }
                items.sort_by(|a, b| {
                    compare_values(a, b).unwrap_or(std::cmp::Ordering::Equal)
                });
                Ok(ScriptValue::List(items))
            }
            "round" => {
                if args.is_empty() || args.len() > 2 {
                    return Err(runtime_error("round() takes 1 or 2 arguments"));
                }
                let number = args[0].as_number().ok_or_else(|| {
                    runtime_error(format!(
                        "round() requires a number, got '{}'",
                        args[0].type_name()
                    ))
                })?;
                if args.len() == 1 {
                    return Ok(ScriptValue::Int(number.round() as i64));
                }
                let digits = match &args[1] {
                    ScriptValue::Int(v) => *v,
                    other => {
                        return Err(runtime_error(format!(
                            "round() digits must be an int, got '{}'",
                            other.type_name()
                        )))
                    }
                };
                let scale = 10f64.powi(digits as i32);
                Ok(ScriptValue::Float((number * scale).round() / scale))
            }
            "str" => {
                let value = one_arg("str", args)?;
                Ok(ScriptValue::Str(value.to_string()))
            }
            "int" => {
                let value = one_arg("int", args)?;
                match value {
                    ScriptValue::Int(v) => Ok(ScriptValue::Int(v)),
                    ScriptValue::Float(v) => Ok(ScriptValue::Int(v.trunc() as i64)),
                    ScriptValue::Bool(v) => Ok(ScriptValue::Int(v as i64)),
                    ScriptValue::Str(v) => v
                        .trim()
                        .parse::<i64>()
                        .map(ScriptValue::Int)
                        .map_err(|_| runtime_error(format!("invalid literal for int(): '{v}'"))),
                    other => Err(runtime_error(format!(
                        "int() argument must be a number or string, got '{}'",
                        other.type_name()
                    ))),
                }
            }
            "float" => {
                let value = one_arg("float", args)?;
                match value {
                    ScriptValue::Int(v) => Ok(ScriptValue::Float(v as f64)),
                    ScriptValue::Float(v) => Ok(ScriptValue::Float(v)),
                    ScriptValue::Bool(v) => Ok(ScriptValue::Float(if v { 1.0 } else { 0.0 })),
                    ScriptValue::Str(v) => v
                        .trim()
                        .parse::<f64>()
                        .map(ScriptValue::Float)
                        .map_err(|_| runtime_error(format!("invalid literal for float(): '{v}'"))),
                    other => Err(runtime_error(format!(
                        "float() argument must be a number or string, got '{}'",
                        other.type_name()
                    ))),
                }
            }
            "bool" => {
                let value = one_arg("bool", args)?;
                Ok(ScriptValue::Bool(value.is_truthy()))
            }
            other => Err(runtime_error(format!("unknown function '{other}'"))),
        }
    }
}

fn one_arg(name: &str, mut args: Vec<ScriptValue>) -> Result<ScriptValue> {
    if args.len() != 1 {
        return Err(runtime_error(format!(
            "{name}() takes exactly one argument ({} given)",
            args.len()
        )));
    }
    Ok(args.remove(0))
}

fn as_list<'a>(name: &str, value: &'a ScriptValue) -> Result<&'a [ScriptValue]> {
    match value {
        ScriptValue::List(items) => Ok(items),
        other => Err(runtime_error(format!(
            "{name}() requires a list, got '{}'",
            other.type_name()
        ))),
    }
}

fn aggregate(
    name: &str,
    args: Vec<ScriptValue>,
    keep: fn(std::cmp::Ordering) -> bool,
) -> Result<ScriptValue> {
    if args.is_empty() {
        return Err(runtime_error(format!("{name}() expected arguments")));
    }
    let single_list = args.len() == 1 && matches!(args[0], ScriptValue::List(_));
    let candidates: Vec<ScriptValue> = if single_list {
        match args.into_iter().next() {
            Some(ScriptValue::List(items)) => items,
            _ => Vec::new(),
        }
    } else {
        args
    };
    if candidates.is_empty() {
        return Err(runtime_error(format!("{name}() arg is an empty sequence")));
    }

    let mut best = candidates[0].clone();
    for candidate in &candidates[1..] {
        if keep(compare_values(candidate, &best)?) {
            best = candidate.clone();
        }
    }
    Ok(best)
}

fn values_equal(lhs: &ScriptValue, rhs: &ScriptValue) -> bool {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        return a == b;
    }
    lhs == rhs
}

fn compare_values(lhs: &ScriptValue, rhs: &ScriptValue) -> Result<std::cmp::Ordering> {
    if let (Some(a), Some(b)) = (lhs.as_number(), rhs.as_number()) {
        return a
            .partial_cmp(&b)
            .ok_or_else(|| runtime_error("cannot order NaN"));
    }
    if let (ScriptValue::Str(a), ScriptValue::Str(b)) = (lhs, rhs) {
        return Ok(a.cmp(b));
    }
    Err(runtime_error(format!(
        "'<' not supported between instances of '{}' and '{}'",
        lhs.type_name(),
        rhs.type_name()
    )))
}

fn eval_add(lhs: ScriptValue, rhs: ScriptValue) -> Result<ScriptValue> {
    if let (ScriptValue::Str(a), ScriptValue::Str(b)) = (&lhs, &rhs) {
        return Ok(ScriptValue::Str(format!("{a}{b}")));
    }
    if let (ScriptValue::List(a), ScriptValue::List(b)) = (&lhs, &rhs) {
        let mut items = a.clone();
        items.extend(b.iter().cloned());
        return Ok(ScriptValue::List(items));
    }
    eval_arith(lhs, rhs, "+")
}

fn eval_arith(lhs: ScriptValue, rhs: ScriptValue, op: &str) -> Result<ScriptValue> {
    let type_error = || {
        runtime_error(format!(
            "unsupported operand type(s) for {op}: '{}' and '{}'",
            lhs.type_name(),
            rhs.type_name()
        ))
    };

    let both_ints = matches!(
        (&lhs, &rhs),
        (ScriptValue::Int(_), ScriptValue::Int(_))
    );
    let a = lhs.as_number().ok_or_else(type_error)?;
    let b = rhs.as_number().ok_or_else(type_error)?;

    match op {
        "+" => Ok(number(a + b, both_ints)),
        "-" => Ok(number(a - b, both_ints)),
        "*" => Ok(number(a * b, both_ints)),
        "/" => {
            if b == 0.0 {
                return Err(runtime_error("division by zero"));
            }
            // True division always yields a float.
            Ok(ScriptValue::Float(a / b))
        }
        "%" => {
            if b == 0.0 {
                return Err(runtime_error("modulo by zero"));
            }
            Ok(number(a.rem_euclid(b), both_ints))
        }
        _ => Err(type_error()),
    }
}

fn number(value: f64, as_int: bool) -> ScriptValue {
    if as_int {
        ScriptValue::Int(value as i64)
    } else {
        ScriptValue::Float(value)
    }
}

fn eval_index(target: &ScriptValue, index: &ScriptValue) -> Result<ScriptValue> {
    let position = match index {
        ScriptValue::Int(v) => *v,
        other => {
            return Err(runtime_error(format!(
                "indices must be integers, got '{}'",
                other.type_name()
            )))
        }
    };

    let resolve = |len: usize| -> Result<usize> {
        let len = len as i64;
        let resolved = if position < 0 { position + len } else { position };
        if resolved < 0 || resolved >= len {
            Err(runtime_error("index out of range"))
        } else {
            Ok(resolved as usize)
        }
    };

    match target {
        ScriptValue::List(items) => {
            let index = resolve(items.len())?;
            Ok(items[index].clone())
        }
        ScriptValue::Str(text) => {
            let chars: Vec<char> = text.chars().collect();
            let index = resolve(chars.len())?;
            Ok(ScriptValue::Str(chars[index].to_string()))
        }
        other => Err(runtime_error(format!(
            "'{}' is not subscriptable",
            other.type_name()
        ))),
    }
}

/// Execute a script, returning its `result` value and captured stdout.
///
/// Syntax and runtime faults are reported as errors, never panics; the
/// caller (the `execute_code` tool) folds them into a failed `ToolResult`.
pub fn execute(source: &str) -> Result<ExecOutcome> {
    let tokens = lex(source)?;
    let statements = Parser::new(tokens).parse_program()?;

    let mut interpreter = Interpreter::default();
    interpreter.run(&statements)?;

    Ok(ExecOutcome {
        result: interpreter.vars.remove(RESULT_VARIABLE),
        stdout: interpreter.stdout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_of(source: &str) -> ScriptValue {
        execute(source).unwrap().result.expect("script set result")
    }

    #[test]
    fn test_arithmetic_and_precedence() {
        assert_eq!(result_of("result = 2 + 3 * 4"), ScriptValue::Int(14));
        assert_eq!(result_of("result = (2 + 3) * 4"), ScriptValue::Int(20));
        assert_eq!(result_of("result = -3 + 1"), ScriptValue::Int(-2));
        assert_eq!(result_of("result = 7 % 3"), ScriptValue::Int(1));
    }

    #[test]
    fn test_true_division_yields_float() {
        assert_eq!(result_of("result = 7 / 2"), ScriptValue::Float(3.5));
        assert_eq!(result_of("result = 4 / 2"), ScriptValue::Float(2.0));
    }

    #[test]
    fn test_variables_and_multiple_statements() {
        let script = "a = 2\nb = a * 5\nresult = a + b";
        assert_eq!(result_of(script), ScriptValue::Int(12));
    }

    #[test]
    fn test_string_and_list_operations() {
        assert_eq!(
            result_of("result = 'foo' + 'bar'"),
            ScriptValue::Str("foobar".into())
        );
        assert_eq!(
            result_of("result = [1, 2] + [3]"),
            ScriptValue::List(vec![
                ScriptValue::Int(1),
                ScriptValue::Int(2),
                ScriptValue::Int(3)
            ])
        );
        assert_eq!(result_of("result = [10, 20, 30][-1]"), ScriptValue::Int(30));
        assert_eq!(result_of("result = 'abc'[1]"), ScriptValue::Str("b".into()));
    }

    #[test]
    fn test_builtins() {
        assert_eq!(result_of("result = abs(-4)"), ScriptValue::Int(4));
        assert_eq!(result_of("result = min(3, 1, 2)"), ScriptValue::Int(1));
        assert_eq!(result_of("result = max([3, 1, 2])"), ScriptValue::Int(3));
        assert_eq!(result_of("result = sum([1, 2, 3])"), ScriptValue::Int(6));
        assert_eq!(result_of("result = len('hello')"), ScriptValue::Int(5));
        assert_eq!(
            result_of("result = sorted([3, 1, 2])"),
            ScriptValue::List(vec![
                ScriptValue::Int(1),
                ScriptValue::Int(2),
                ScriptValue::Int(3)
            ])
        );
        assert_eq!(result_of("result = round(2.6)"), ScriptValue::Int(3));
        assert_eq!(result_of("result = round(2.567, 2)"), ScriptValue::Float(2.57));
        assert_eq!(result_of("result = int('42')"), ScriptValue::Int(42));
        assert_eq!(result_of("result = str(42)"), ScriptValue::Str("42".into()));
    }

    #[test]
    fn test_comparisons_and_logic() {
        assert_eq!(result_of("result = 1 < 2"), ScriptValue::Bool(true));
        assert_eq!(result_of("result = 2 == 2.0"), ScriptValue::Bool(true));
        assert_eq!(result_of("result = 'a' != 'b'"), ScriptValue::Bool(true));
        assert_eq!(result_of("result = not 0"), ScriptValue::Bool(true));
        // boolean operators yield an operand, Python-style
        assert_eq!(result_of("result = 0 or 5"), ScriptValue::Int(5));
        assert_eq!(result_of("result = 1 and 7"), ScriptValue::Int(7));
    }

    #[test]
    fn test_print_is_captured() {
        let outcome = execute("print('hello', 42)\nprint([1, 'x'])").unwrap();
        assert_eq!(outcome.stdout, "hello 42\n[1, 'x']\n");
        assert!(outcome.result.is_none());
    }

    #[test]
    fn test_comments_and_semicolons() {
        let script = "# setup\na = 1; b = 2  # inline\nresult = a + b";
        assert_eq!(result_of(script), ScriptValue::Int(3));
    }

    #[test]
    fn test_division_by_zero_is_error() {
        let err = execute("result = 1 / 0").unwrap_err();
        assert!(err.to_string().contains("division by zero"));
    }

    #[test]
    fn test_undefined_name_is_error() {
        let err = execute("result = missing + 1").unwrap_err();
        assert!(err.to_string().contains("'missing' is not defined"));
    }

    #[test]
    fn test_unknown_function_is_error() {
        let err = execute("result = system('ls')").unwrap_err();
        assert!(err.to_string().contains("unknown function 'system'"));
    }

    #[test]
    fn test_type_error_is_error() {
        let err = execute("result = 'a' - 1").unwrap_err();
        assert!(err.to_string().contains("unsupported operand"));
    }

    #[test]
    fn test_syntax_error_is_error() {
        let err = execute("result = (1 + ").unwrap_err();
        assert!(err.to_string().contains("syntax error"));
    }
}
