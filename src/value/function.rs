use std::cell::RefCell;
use std::rc::Rc;

use crate::ast::statement::Block;
use crate::environment::Environment;

/// A closure: its parameter names, its body, and the scope that was active
/// when the `FunctionLiteral` was evaluated. Capturing `Rc<RefCell<Environment>>`
/// is what makes recursive `đặt f = hàm(...) { ... f(...) ... }` work: the
/// scope `f` is bound into is the same scope the closure captured.
#[derive(Debug, Clone)]
pub struct Function {
    pub params: Vec<String>,
    pub body: Block,
    pub env: Rc<RefCell<Environment>>,
}
