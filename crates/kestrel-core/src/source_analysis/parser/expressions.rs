// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Expression parsing by precedence climbing.
//!
//! Each precedence level is one method that parses operands at the next
//! higher level and loops while the current token is one of its operators.
//! From lowest to highest binding power:
//!
//! | Level            | Operators                  | Associativity |
//! |------------------|----------------------------|---------------|
//! | assignment       | `=` `+=` `-=` `*=` `/=`    | right         |
//! | logical or       | `\|\|`                     | left          |
//! | logical and      | `&&`                       | left          |
//! | equality         | `==` `!=`                  | left          |
//! | comparison       | `<` `<=` `>` `>=`          | left          |
//! | additive         | `+` `-`                    | left          |
//! | multiplicative   | `*` `/` `%`                | left          |
//! | unary            | `!` `-`                    | prefix        |
//! | postfix          | call, `.field`, `[index]`  | left          |

use ecow::EcoString;

use crate::ast::{
    AssignmentExpression, AssignmentOperator, BinaryExpression, BinaryOperator, CallExpression,
    Expression, GroupExpression, Identifier, IndexExpression, Literal, LiteralExpression,
    MemberExpression, UnaryExpression, UnaryOperator,
};
use crate::source_analysis::diagnostic::codes;
use crate::source_analysis::{
    Diagnostic, LiteralValue, ParseError, ParseErrorKind, Span, Token, TokenKind,
};

use super::{ParseResult, Parser};

const LOGICAL_OR: &[(TokenKind, BinaryOperator)] = &[(TokenKind::PipePipe, BinaryOperator::Or)];
const LOGICAL_AND: &[(TokenKind, BinaryOperator)] = &[(TokenKind::AmpAmp, BinaryOperator::And)];
const EQUALITY: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::EqualEqual, BinaryOperator::Equal),
    (TokenKind::BangEqual, BinaryOperator::NotEqual),
];
const COMPARISON: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::Less, BinaryOperator::Less),
    (TokenKind::LessEqual, BinaryOperator::LessEqual),
    (TokenKind::Greater, BinaryOperator::Greater),
    (TokenKind::GreaterEqual, BinaryOperator::GreaterEqual),
];
const ADDITIVE: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::Plus, BinaryOperator::Add),
    (TokenKind::Minus, BinaryOperator::Subtract),
];
const MULTIPLICATIVE: &[(TokenKind, BinaryOperator)] = &[
    (TokenKind::Star, BinaryOperator::Multiply),
    (TokenKind::Slash, BinaryOperator::Divide),
    (TokenKind::Percent, BinaryOperator::Remainder),
];

/// Maps an assignment token to its operator.
const fn assignment_operator(kind: TokenKind) -> Option<AssignmentOperator> {
    match kind {
        TokenKind::Equal => Some(AssignmentOperator::Assign),
        TokenKind::PlusEqual => Some(AssignmentOperator::AddAssign),
        TokenKind::MinusEqual => Some(AssignmentOperator::SubtractAssign),
        TokenKind::StarEqual => Some(AssignmentOperator::MultiplyAssign),
        TokenKind::SlashEqual => Some(AssignmentOperator::DivideAssign),
        _ => None,
    }
}

impl Parser {
    /// Parses an expression.
    ///
    /// Every recursive path back into expression parsing goes through this
    /// method or [`Parser::nested`], so nesting depth is bounded. Uses
    /// `stacker::maybe_grow` to extend the stack on the heap if recursion
    /// under that bound still runs low.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        let span = self.stream.current().span();
        stacker::maybe_grow(32 * 1024, 256 * 1024, || {
            self.nested(span, Self::parse_assignment)
        })
    }

    /// Parses the assignment level (right-associative).
    ///
    /// A target that cannot be assigned to is reported, but the assignment
    /// is still built so the value gets analysed.
    fn parse_assignment(&mut self) -> ParseResult<Expression> {
        let target = self.parse_logical_or()?;
        let Some(operator) = assignment_operator(self.current_kind()) else {
            return Ok(target);
        };
        self.stream.advance();

        if !target.is_assignable() {
            self.diagnostics.push(
                ParseError::new(ParseErrorKind::InvalidAssignmentTarget, target.span()).into(),
            );
        }

        let value = self.parse_expression()?;
        let span = target.span().merge(value.span());
        Ok(Expression::Assignment(AssignmentExpression {
            operator,
            target: Box::new(target),
            value: Box::new(value),
            span,
        }))
    }

    pub(super) fn parse_logical_or(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(LOGICAL_OR, Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(LOGICAL_AND, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(EQUALITY, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(COMPARISON, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(ADDITIVE, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(MULTIPLICATIVE, Self::parse_unary)
    }

    /// Parses one left-associative level: `operand (op operand)*`.
    fn parse_binary_level(
        &mut self,
        operators: &[(TokenKind, BinaryOperator)],
        operand: fn(&mut Self) -> ParseResult<Expression>,
    ) -> ParseResult<Expression> {
        let mut left = operand(self)?;
        self.chained(|parser| loop {
            let kind = parser.current_kind();
            let Some(operator) = operators
                .iter()
                .find_map(|&(token, operator)| (token == kind).then_some(operator))
            else {
                return Ok(left);
            };
            let operator_token = parser.stream.advance();
            parser.deepen(operator_token.span())?;
            let right = operand(parser)?;
            let span = left.span().merge(right.span());
            left = Expression::Binary(BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        })
    }

    /// Parses `!expr`, `-expr`, or a postfix expression.
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let operator = match self.current_kind() {
            TokenKind::Bang => UnaryOperator::Not,
            TokenKind::Minus => UnaryOperator::Negate,
            _ => return self.parse_postfix(),
        };
        let operator_token = self.stream.advance();
        let operand = self.nested(operator_token.span(), Self::parse_unary)?;
        let span = operator_token.span().merge(operand.span());
        Ok(Expression::Unary(UnaryExpression {
            operator,
            operand: Box::new(operand),
            span,
        }))
    }

    /// Parses a primary expression followed by calls, member accesses and
    /// index operations.
    fn parse_postfix(&mut self) -> ParseResult<Expression> {
        let mut expression = self.parse_primary()?;
        self.chained(|parser| loop {
            let kind = parser.current_kind();
            if !matches!(
                kind,
                TokenKind::LeftParen | TokenKind::Dot | TokenKind::LeftBracket
            ) {
                return Ok(expression);
            }
            let opener = parser.stream.advance();
            parser.deepen(opener.span())?;
            expression = match kind {
                TokenKind::LeftParen => {
                    let arguments = parser.parse_arguments()?;
                    let close = parser.stream.expect(TokenKind::RightParen)?;
                    let span = expression.span().merge(close.span());
                    Expression::Call(CallExpression {
                        callee: Box::new(expression),
                        arguments,
                        span,
                    })
                }
                TokenKind::Dot => {
                    let member = parser.expect_identifier("field name")?;
                    let member = Identifier::new(member.text(), member.span());
                    let span = expression.span().merge(member.span);
                    Expression::Member(MemberExpression {
                        object: Box::new(expression),
                        member,
                        span,
                    })
                }
                _ => {
                    let index = parser.parse_expression()?;
                    let close = parser.stream.expect(TokenKind::RightBracket)?;
                    let span = expression.span().merge(close.span());
                    Expression::Index(IndexExpression {
                        object: Box::new(expression),
                        index: Box::new(index),
                        span,
                    })
                }
            };
        })
    }

    /// Parses comma-separated call arguments up to (not including) `)`.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        let mut arguments = Vec::new();
        while !self.check(TokenKind::RightParen) {
            arguments.push(self.parse_expression()?);
            if self.stream.try_consume(TokenKind::Comma).is_none() {
                break;
            }
        }
        Ok(arguments)
    }

    /// Parses a literal, identifier, parenthesized expression or `match`.
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current_kind() {
            TokenKind::Integer | TokenKind::Float | TokenKind::String => {
                let token = self.stream.advance();
                let value = self.literal_value(&token)?;
                Ok(Expression::Literal(LiteralExpression {
                    value,
                    span: token.span(),
                }))
            }
            TokenKind::True | TokenKind::False => {
                let token = self.stream.advance();
                Ok(Expression::Literal(LiteralExpression {
                    value: Literal::Boolean(token.kind() == TokenKind::True),
                    span: token.span(),
                }))
            }
            TokenKind::Identifier => {
                let token = self.stream.advance();
                Ok(Expression::Identifier(Identifier::new(
                    token.text(),
                    token.span(),
                )))
            }
            TokenKind::LeftParen => {
                let open = self.stream.advance();
                let inner = self.parse_expression()?;
                let close = self.stream.expect(TokenKind::RightParen)?;
                Ok(Expression::Group(GroupExpression {
                    expression: Box::new(inner),
                    span: open.span().merge(close.span()),
                }))
            }
            TokenKind::Match => self.parse_match().map(Expression::Match),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Converts a literal token's lexed value into an AST literal,
    /// interpreting string escapes.
    pub(super) fn literal_value(&mut self, token: &Token) -> ParseResult<Literal> {
        match token.literal() {
            Some(LiteralValue::Integer(value)) => Ok(Literal::Integer(*value)),
            Some(LiteralValue::Float(value)) => Ok(Literal::Float(*value)),
            Some(LiteralValue::String(raw)) => {
                Ok(Literal::String(self.unescape(raw, token.span())))
            }
            None => Err(ParseError::expected(
                "literal value",
                token.to_string(),
                token.span(),
            )),
        }
    }

    /// Interprets escape sequences in raw string contents.
    ///
    /// An unknown escape is reported as a warning and the escaped character
    /// is kept as written.
    fn unescape(&mut self, raw: &str, span: Span) -> EcoString {
        let mut value = EcoString::new();
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                value.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some('0') => value.push('\0'),
                Some(c @ ('\\' | '"' | '\'')) => value.push(c),
                Some(other) => {
                    self.diagnostics.push(
                        Diagnostic::warning(format!("unknown escape sequence '\\{other}'"), span)
                            .with_code(codes::UNKNOWN_ESCAPE),
                    );
                    value.push(other);
                }
                None => value.push('\\'),
            }
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        AssignmentOperator, BinaryOperator, Declaration, Expression, Literal, Statement,
        UnaryOperator,
    };
    use crate::source_analysis::diagnostic::codes;
    use crate::source_analysis::{Diagnostic, Severity, parse_source};

    fn parse_expr_with_diagnostics(source: &str) -> (Expression, Vec<Diagnostic>) {
        let output = parse_source(&format!("{source};"), None);
        let Some(Declaration::Statement(Statement::Expression(stmt))) =
            output.declarations.into_iter().next()
        else {
            panic!("expected an expression statement for {source:?}");
        };
        (stmt.expression, output.diagnostics)
    }

    fn parse_expr(source: &str) -> Expression {
        let (expression, diagnostics) = parse_expr_with_diagnostics(source);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        expression
    }

    /// Renders an expression with explicit parentheses to show structure.
    fn sexpr(expression: &Expression) -> String {
        match expression {
            Expression::Literal(lit) => lit.value.to_string(),
            Expression::Identifier(ident) => ident.name.to_string(),
            Expression::Binary(bin) => {
                format!("({} {} {})", sexpr(&bin.left), bin.operator, sexpr(&bin.right))
            }
            Expression::Unary(un) => format!("({}{})", un.operator.as_str(), sexpr(&un.operand)),
            Expression::Assignment(assign) => format!(
                "({} {} {})",
                sexpr(&assign.target),
                assign.operator.as_str(),
                sexpr(&assign.value)
            ),
            Expression::Call(call) => {
                let args: Vec<_> = call.arguments.iter().map(sexpr).collect();
                format!("{}({})", sexpr(&call.callee), args.join(", "))
            }
            Expression::Member(member) => format!("{}.{}", sexpr(&member.object), member.member.name),
            Expression::Index(index) => format!("{}[{}]", sexpr(&index.object), sexpr(&index.index)),
            Expression::Group(group) => format!("[{}]", sexpr(&group.expression)),
            Expression::Match(_) => "match".to_string(),
        }
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        assert_eq!(sexpr(&parse_expr("1 + 2 * 3")), "(1 + (2 * 3))");
        assert_eq!(sexpr(&parse_expr("1 * 2 + 3")), "((1 * 2) + 3)");
    }

    #[test]
    fn binary_operators_are_left_associative() {
        assert_eq!(sexpr(&parse_expr("a - b - c")), "((a - b) - c)");
        assert_eq!(sexpr(&parse_expr("a / b % c")), "((a / b) % c)");
    }

    #[test]
    fn full_precedence_chain() {
        assert_eq!(
            sexpr(&parse_expr("a || b && c == d < e + f * -g")),
            "(a || (b && (c == (d < (e + (f * (-g)))))))"
        );
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(sexpr(&parse_expr("a = b = c")), "(a = (b = c))");
        let Expression::Assignment(assign) = parse_expr("total += 1") else {
            panic!("expected assignment");
        };
        assert_eq!(assign.operator, AssignmentOperator::AddAssign);
    }

    #[test]
    fn member_and_index_are_assignable() {
        assert_eq!(sexpr(&parse_expr("point.x = 1")), "(point.x = 1)");
        assert_eq!(sexpr(&parse_expr("items[0] = 1")), "(items[0] = 1)");
    }

    #[test]
    fn call_result_is_not_assignable() {
        let (expression, diagnostics) = parse_expr_with_diagnostics("f() = 1");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, Some(codes::INVALID_ASSIGNMENT_TARGET));
        assert_eq!(diagnostics[0].span.start().byte_offset(), 0);
        assert_eq!(diagnostics[0].span.end().byte_offset(), 3);
        assert_eq!(sexpr(&expression), "(f() = 1)");
    }

    #[test]
    fn invalid_target_keeps_the_value_for_analysis() {
        let output = parse_source("fn f() { 1 = undefined_value; }", None);
        assert_eq!(
            output.diagnostics.iter().filter_map(|d| d.code).collect::<Vec<_>>(),
            vec![codes::INVALID_ASSIGNMENT_TARGET]
        );
        let diagnostics = crate::semantic_analysis::analyze(
            &output.declarations,
            &crate::semantic_analysis::AnalysisOptions::default(),
        );
        assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
        assert_eq!(diagnostics[0].code, Some(codes::UNDEFINED_NAME));
        assert_eq!(diagnostics[0].message, "undefined name 'undefined_value'");
    }

    #[test]
    fn postfix_chains() {
        assert_eq!(
            sexpr(&parse_expr("a.b(c, d)[e].f()")),
            "a.b(c, d)[e].f()"
        );
    }

    #[test]
    fn unary_operators_nest() {
        let Expression::Unary(outer) = parse_expr("!!done") else {
            panic!("expected unary");
        };
        assert_eq!(outer.operator, UnaryOperator::Not);
        assert!(matches!(*outer.operand, Expression::Unary(_)));
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(sexpr(&parse_expr("(1 + 2) * 3")), "([(1 + 2)] * 3)");
    }

    #[test]
    fn literals() {
        assert_eq!(sexpr(&parse_expr("1.5")), "1.5");
        assert_eq!(sexpr(&parse_expr("true")), "true");
        let Expression::Literal(lit) = parse_expr(r#""a\tb\"""#) else {
            panic!("expected literal");
        };
        assert_eq!(lit.value, Literal::String("a\tb\"".into()));
    }

    #[test]
    fn unknown_escape_is_warning() {
        let (expression, diagnostics) = parse_expr_with_diagnostics(r#""\q""#);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].code, Some(codes::UNKNOWN_ESCAPE));
        let Expression::Literal(lit) = expression else {
            panic!("expected literal");
        };
        assert_eq!(lit.value, Literal::String("q".into()));
    }

    #[test]
    fn binary_span_covers_operands() {
        let expression = parse_expr("alpha + beta");
        assert_eq!(expression.span().start().byte_offset(), 0);
        assert_eq!(expression.span().end().byte_offset(), 12);
        let Expression::Binary(bin) = expression else {
            panic!("expected binary");
        };
        assert_eq!(bin.operator, BinaryOperator::Add);
        assert!(bin.span.contains(bin.left.span()));
        assert!(bin.span.contains(bin.right.span()));
    }

    #[test]
    fn missing_operand_is_syntax_error() {
        let output = parse_source("1 + ;", None);
        assert_eq!(output.diagnostics[0].message, "expected expression, found ';'");
    }

    #[test]
    fn unclosed_call_is_syntax_error() {
        let output = parse_source("f(a, b; let ok = 1;", None);
        assert_eq!(output.diagnostics[0].message, "expected ')', found ';'");
        assert!(matches!(output.declarations.last(), Some(Declaration::Let(_))));
    }
}
