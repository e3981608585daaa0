//! Expression parsing implementation
//!
//! Conditions, expressions, terms and factors. Each routine returns the
//! *place* holding its value: a name (declared identifier or temporary) or an
//! integer literal used in place.
//!
//! # Grammar
//!
//! ```text
//! condition  ::= ODD expression | expression relop expression
//! expression ::= ["+" | "-"] term {("+" | "-") term}
//! term       ::= factor {("*" | "/") factor}
//! factor     ::= ident | number | "(" expression ")"
//! ```
//!
//! # Generation Quirks
//!
//! Code generation deliberately stops after one binary operator at each
//! level: `expression` and `term` return as soon as they have combined two
//! operands, so `a + b + c` leaves `+ c` unconsumed and the caller reports a
//! syntax error. Parenthesize to chain operators.
//!
//! A leading `-` only produces a negation (`@`) when a binary operator
//! follows the first term; `-5` on its own yields the place `5`. `ODD`
//! generates no code and has no place.

use crate::ir::{Operand, Operator, RelOp};
use crate::parser::lexer::{Keyword, Punct, TokenKind};
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse a condition, returning the place of its 0/1 result.
    ///
    /// `ODD expression` returns `None`.
    pub(crate) fn parse_condition(&mut self) -> Result<Option<Operand>, ParseError> {
        self.enter("condition");

        if self.match_keyword(Keyword::Odd) {
            self.parse_expression()?;
            return Ok(None);
        }

        let left = self.parse_expression()?;
        let Some(op) = self.relational_operator() else {
            return Err(self.error(format!(
                "Expected relational operator ('=', '#', '<', '<=', '>', '>='), found {}",
                self.peek()
            )));
        };
        let right = self.parse_expression()?;

        // Materialize the comparison as 0/1 in a fresh temporary:
        //   n:   (relop, left, right, n+3)
        //   n+1: (:=, 0, _, t)
        //   n+2: (jmp, _, _, n+4)
        //   n+3: (:=, 1, _, t)
        let temp = self.ctx.new_temporary();
        self.ctx.emit_jump(Operator::Rel(op), left, right, 3);
        self.ctx.emit(
            Operator::Assign,
            Operand::Int(0),
            Operand::Empty,
            Operand::name(temp.as_str()),
        );
        self.ctx.emit_jump(Operator::Jmp, Operand::Empty, Operand::Empty, 2);
        self.ctx.emit(
            Operator::Assign,
            Operand::Int(1),
            Operand::Empty,
            Operand::name(temp.as_str()),
        );

        Ok(Some(Operand::Name(temp)))
    }

    pub(crate) fn parse_expression(&mut self) -> Result<Operand, ParseError> {
        self.enter("expression");

        let negate = if self.match_punct(Punct::Plus) {
            false
        } else {
            self.match_punct(Punct::Minus)
        };

        let left = self.parse_term()?;
        let Some(op) = self.additive_operator() else {
            return Ok(left);
        };
        let right = self.parse_term()?;
        let sum = self.emit_binary(op, left, right);

        if !negate {
            return Ok(sum);
        }

        let negated = self.ctx.new_temporary();
        self.ctx.emit(
            Operator::Neg,
            sum,
            Operand::Empty,
            Operand::name(negated.as_str()),
        );
        Ok(Operand::Name(negated))
    }

    pub(crate) fn parse_term(&mut self) -> Result<Operand, ParseError> {
        self.enter("term");

        let left = self.parse_factor()?;
        let Some(op) = self.multiplicative_operator() else {
            return Ok(left);
        };
        let right = self.parse_factor()?;
        Ok(self.emit_binary(op, left, right))
    }

    pub(crate) fn parse_factor(&mut self) -> Result<Operand, ParseError> {
        self.enter("factor");

        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let place = Operand::name(name.as_str());
                self.advance();
                Ok(place)
            }
            TokenKind::Number(value) => {
                let place = Operand::Int(*value);
                self.advance();
                Ok(place)
            }
            TokenKind::Punct(Punct::LParen) => {
                self.advance();
                let place = self.parse_expression()?;
                self.expect_punct(Punct::RParen, "to close '('")?;
                Ok(place)
            }
            _ => Err(self.error(format!(
                "Expected identifier, number or '(' in factor, found {}",
                self.peek()
            ))),
        }
    }

    /// `(op, left, right, t)` into a fresh temporary `t`.
    fn emit_binary(&mut self, op: Operator, left: Operand, right: Operand) -> Operand {
        let temp = self.ctx.new_temporary();
        self.ctx.emit(op, left, right, Operand::name(temp.as_str()));
        Operand::Name(temp)
    }

    fn additive_operator(&mut self) -> Option<Operator> {
        let op = match self.peek().kind {
            TokenKind::Punct(Punct::Plus) => Operator::Add,
            TokenKind::Punct(Punct::Minus) => Operator::Sub,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn multiplicative_operator(&mut self) -> Option<Operator> {
        let op = match self.peek().kind {
            TokenKind::Punct(Punct::Star) => Operator::Mul,
            TokenKind::Punct(Punct::Slash) => Operator::Div,
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn relational_operator(&mut self) -> Option<RelOp> {
        let op = match self.peek().kind {
            TokenKind::Punct(Punct::Eq) => RelOp::Eq,
            TokenKind::Punct(Punct::Hash) => RelOp::Ne,
            TokenKind::Punct(Punct::Lt) => RelOp::Lt,
            TokenKind::Punct(Punct::Le) => RelOp::Le,
            TokenKind::Punct(Punct::Gt) => RelOp::Gt,
            TokenKind::Punct(Punct::Ge) => RelOp::Ge,
            _ => return None,
        };
        self.advance();
        Some(op)
    }
}

#[cfg(test)]
mod tests {
    use crate::compiler::compile;
    use crate::ir::{Operand, Operator, RelOp};

    fn program_text(source: &str) -> Vec<String> {
        compile(source)
            .unwrap()
            .quads()
            .iter()
            .map(|q| q.to_string())
            .collect()
    }

    #[test]
    fn test_term_binds_factors() {
        assert_eq!(
            program_text("VAR x, y; x := y * 3."),
            vec!["1: (*, y, 3, #TEMP1)", "2: (:=, #TEMP1, _, x)"]
        );
    }

    #[test]
    fn test_expression_of_terms() {
        assert_eq!(
            program_text("VAR a, b, x; x := a * 2 - b / 4."),
            vec![
                "1: (*, a, 2, #TEMP1)",
                "2: (/, b, 4, #TEMP2)",
                "3: (-, #TEMP1, #TEMP2, #TEMP3)",
                "4: (:=, #TEMP3, _, x)",
            ]
        );
    }

    #[test]
    fn test_parenthesized_expression_emits_no_extra_code() {
        assert_eq!(
            program_text("VAR a, b, c, x; x := (a + b) * c."),
            vec![
                "1: (+, a, b, #TEMP1)",
                "2: (*, #TEMP1, c, #TEMP2)",
                "3: (:=, #TEMP2, _, x)",
            ]
        );
    }

    #[test]
    fn test_chained_addition_is_rejected() {
        let err = compile("VAR a, b, c, x; x := a + b + c.").unwrap_err();
        assert!(err.to_string().contains("found '+'"), "{}", err);

        let err = compile("VAR a, b, c, x; x := a * b * c.").unwrap_err();
        assert!(err.to_string().contains("found '*'"), "{}", err);
    }

    #[test]
    fn test_leading_minus_without_operator_is_dropped() {
        assert_eq!(program_text("VAR x; x := -5."), vec!["1: (:=, 5, _, x)"]);
    }

    #[test]
    fn test_leading_minus_negates_binary_result() {
        assert_eq!(
            program_text("VAR a, b, x; x := -a + b."),
            vec![
                "1: (+, a, b, #TEMP1)",
                "2: (@, #TEMP1, _, #TEMP2)",
                "3: (:=, #TEMP2, _, x)",
            ]
        );
    }

    #[test]
    fn test_leading_plus_is_ignored() {
        assert_eq!(
            program_text("VAR a, x; x := +a - 1."),
            vec!["1: (-, a, 1, #TEMP1)", "2: (:=, #TEMP1, _, x)"]
        );
    }

    #[test]
    fn test_every_relational_operator() {
        let cases = [
            ("=", RelOp::Eq),
            ("#", RelOp::Ne),
            ("<", RelOp::Lt),
            ("<=", RelOp::Le),
            (">", RelOp::Gt),
            (">=", RelOp::Ge),
        ];
        for (text, op) in cases {
            let source = format!("VAR x; IF x {} 1 THEN .", text);
            let compilation = compile(&source).unwrap();
            let first = &compilation.quads()[0];
            assert_eq!(first.op, Operator::Rel(op), "{}", text);
            assert_eq!(first.target(), Some(4));
            assert_eq!(compilation.quads()[3].arg1, Operand::Int(1));
        }
    }

    #[test]
    fn test_odd_emits_nothing() {
        let compilation = compile("VAR x; IF ODD x THEN .").unwrap();
        assert_eq!(compilation.quads().len(), 1);
        assert_eq!(compilation.symbols().temporary_count(), 0);
    }

    #[test]
    fn test_missing_relational_operator() {
        let err = compile("VAR x; IF x THEN x := 1.").unwrap_err();
        assert!(err.to_string().contains("relational operator"));
    }

    #[test]
    fn test_bad_factor() {
        let err = compile("VAR x; x := ;.").unwrap_err();
        assert!(err.to_string().contains("in factor"));

        let err = compile("VAR x; x := (1 + 2.").unwrap_err();
        assert!(err.to_string().contains("')'"));
    }
}
