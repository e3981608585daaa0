//! Quadruple emitter with save/refill points
//!
//! Lines are handed out from a single counter starting at 1, so the index of
//! a quadruple in the list is always `line - 1`. Save points are backward
//! jump targets (loop re-entry); refill points are already-emitted forward
//! jumps whose target is patched once the end of their construct is known.
//!
//! Both kinds of point are kept on stacks: a construct pushes its point on
//! entry and pops it when it closes, so nested loops never overwrite each
//! other's pending jumps.

use super::quad::{Operand, Operator, Quadruple};

#[derive(Debug, Clone)]
pub struct QuadEmitter {
    quads: Vec<Quadruple>,
    next_line: usize,
    save_points: Vec<usize>,
    refill_points: Vec<usize>,
}

impl QuadEmitter {
    pub fn new() -> Self {
        QuadEmitter {
            quads: Vec::new(),
            next_line: 1,
            save_points: Vec::new(),
            refill_points: Vec::new(),
        }
    }

    /// Line number the next emitted quadruple will get.
    pub fn current_line(&self) -> usize {
        self.next_line
    }

    /// Append a quadruple and return its line.
    pub fn emit(&mut self, op: Operator, arg1: Operand, arg2: Operand, result: Operand) -> usize {
        let line = self.next_line;
        self.quads.push(Quadruple {
            line,
            op,
            arg1,
            arg2,
            result,
        });
        self.next_line += 1;
        line
    }

    /// Append a jump whose target is `offset` lines after the jump itself.
    pub fn emit_jump(
        &mut self,
        op: Operator,
        arg1: Operand,
        arg2: Operand,
        offset: usize,
    ) -> usize {
        let target = self.next_line + offset;
        self.emit(op, arg1, arg2, Operand::Line(target))
    }

    /// Record the next line as a backward jump target.
    pub fn mark_save_point(&mut self) -> usize {
        self.save_points.push(self.next_line);
        self.next_line
    }

    /// Pop the innermost save point.
    pub fn take_save_point(&mut self) -> Option<usize> {
        self.save_points.pop()
    }

    /// Record the most recently emitted quadruple as awaiting a target.
    pub fn mark_refill_point(&mut self) -> Option<usize> {
        let line = self.quads.last()?.line;
        self.refill_points.push(line);
        Some(line)
    }

    /// Patch the innermost refill point to jump to the current line.
    ///
    /// Returns `(patched line, target)`.
    pub fn backpatch(&mut self) -> Option<(usize, usize)> {
        let line = self.refill_points.pop()?;
        let target = self.next_line;
        let quad = self.quads.get_mut(line - 1)?;
        debug_assert!(quad.op.is_jump(), "backpatching a non-jump at line {}", line);
        quad.result = Operand::Line(target);
        Some((line, target))
    }

    pub fn quads(&self) -> &[Quadruple] {
        &self.quads
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// True when no jump is waiting for a backpatch and no save point is open.
    pub fn is_resolved(&self) -> bool {
        self.refill_points.is_empty() && self.save_points.is_empty()
    }
}

impl Default for QuadEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_start_at_one() {
        let mut code = QuadEmitter::new();
        let x = Operand::name("x");
        let y = Operand::name("y");
        let first = code.emit(Operator::Assign, Operand::Int(1), Operand::Empty, x);
        let second = code.emit(Operator::Assign, Operand::Int(2), Operand::Empty, y);
        assert_eq!((first, second), (1, 2));
        assert_eq!(code.current_line(), 3);
    }

    #[test]
    fn test_emit_jump_is_relative() {
        let mut code = QuadEmitter::new();
        code.emit(Operator::Assign, Operand::Int(0), Operand::Empty, Operand::name("t"));
        code.emit_jump(Operator::Jmp, Operand::Empty, Operand::Empty, 2);
        assert_eq!(code.quads()[1].target(), Some(4));
    }

    #[test]
    fn test_backpatch_nested() {
        let mut code = QuadEmitter::new();
        code.emit(Operator::Je, Operand::name("a"), Operand::Empty, Operand::Line(0));
        code.mark_refill_point();
        code.emit(Operator::Je, Operand::name("b"), Operand::Empty, Operand::Line(0));
        code.mark_refill_point();
        code.emit(Operator::Assign, Operand::Int(1), Operand::Empty, Operand::name("x"));

        assert_eq!(code.backpatch(), Some((2, 4)));
        code.emit(Operator::Assign, Operand::Int(2), Operand::Empty, Operand::name("y"));
        assert_eq!(code.backpatch(), Some((1, 5)));

        assert!(code.is_resolved());
        assert_eq!(code.quads()[0].target(), Some(5));
        assert_eq!(code.quads()[1].target(), Some(4));
    }

    #[test]
    fn test_save_point_records_next_line() {
        let mut code = QuadEmitter::new();
        code.emit(Operator::Assign, Operand::Int(0), Operand::Empty, Operand::name("x"));
        assert_eq!(code.mark_save_point(), 2);
        assert_eq!(code.take_save_point(), Some(2));
        assert_eq!(code.take_save_point(), None);
    }
}
