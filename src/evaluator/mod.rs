pub mod call;
pub mod import;
pub mod index;
pub mod operators;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ast::expression::{Expression, InfixOperator};
use crate::ast::statement::{Block, Statement};
use crate::ast::{Node, Program};
use crate::environment::Environment;
use crate::token::Position;
use crate::value::{CallFrame, Function, Mutability, Value};

pub struct Evaluator {
    pub env: Rc<RefCell<Environment>>,
    pub call_stack: Vec<CallFrame>,
    pub interrupt: Arc<AtomicBool>,
    pub file: String,
}

impl Evaluator {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            env: Environment::new(),
            call_stack: Vec::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
            file: file.into(),
        }
    }

    pub fn with_interrupt(file: impl Into<String>, interrupt: Arc<AtomicBool>) -> Self {
        Self {
            env: Environment::new(),
            call_stack: Vec::new(),
            interrupt,
            file: file.into(),
        }
    }

    /// A fresh evaluator sharing this one's interrupt flag but with its
    /// own environment — used by `thăm_dò`'s nested REPL, which binds into
    /// the *current* environment rather than a blank one.
    pub fn child_with_env(&self, env: Rc<RefCell<Environment>>) -> Self {
        Self {
            env,
            call_stack: Vec::new(),
            interrupt: self.interrupt.clone(),
            file: self.file.clone(),
        }
    }

    fn check_interrupt(&self, position: &Position) -> Option<Value> {
        if self.interrupt.swap(false, Ordering::SeqCst) {
            Some(Value::error("process interrupted", position.clone()))
        } else {
            None
        }
    }

    pub fn eval_program(&mut self, program: &Program) -> Value {
        let mut result = Value::Null;
        for stmt in &program.statements {
            result = self.eval_statement(stmt);
            match result {
                Value::BreakSignal => {
                    return Value::error("cannot break outside a loop", stmt.position().clone())
                }
                Value::ContinueSignal => {
                    return Value::error("cannot continue outside a loop", stmt.position().clone())
                }
                Value::ReturnValue(ref v) => return (**v).clone(),
                Value::Error { .. } => return result,
                _ => {}
            }
        }
        result
    }

    fn eval_block(&mut self, block: &Block) -> Value {
        let mut result = Value::Null;
        for stmt in &block.statements {
            result = self.eval_statement(stmt);
            if result.is_control_signal() {
                return result;
            }
        }
        result
    }

    fn eval_statement(&mut self, stmt: &Statement) -> Value {
        use crate::ast::statement::Statement::*;
        if let Some(signal) = self.check_interrupt(stmt.position()) {
            return signal;
        }
        match stmt {
            Let(s) => {
                let value = self.eval_expression(&s.value).unwrap_ref();
                if value.is_control_signal() {
                    return value;
                }
                self.env.borrow_mut().set(s.name.clone(), value);
                Value::Null
            }
            Return(s) => {
                let value = self.eval_expression(&s.value).unwrap_ref();
                if value.is_control_signal() {
                    return value;
                }
                Value::ReturnValue(Box::new(value))
            }
            Break(_) => Value::BreakSignal,
            Continue(_) => Value::ContinueSignal,
            Expression(s) => self.eval_expression(&s.expression),
        }
    }

    fn eval_expression(&mut self, expr: &Expression) -> Value {
        use crate::ast::expression::Expression::*;
        if let Some(signal) = self.check_interrupt(expr.position()) {
            return signal;
        }
        match expr {
            Identifier(id) => self.eval_identifier(&id.value, &id.position),
            Boolean(b) => Value::Boolean(b.value),
            Integer(i) => Value::Integer(i.value.clone()),
            Float(f) => Value::Float(f.value),
            Str(s) => Value::Str(s.value.clone()),
            Prefix(p) => self.eval_prefix(p),
            Infix(i) => self.eval_infix(i),
            If(node) => self.eval_if(node),
            While(node) => self.eval_while(node),
            Function(f) => Value::Function(Rc::new(Function {
                params: f.params.iter().map(|p| p.value.clone()).collect(),
                body: f.body.clone(),
                env: self.env.clone(),
            })),
            Call(c) => self.eval_call_expression(c),
            Array(a) => self.eval_array(a),
            Index(idx) => self.eval_index_expression(idx),
            Hash(h) => self.eval_hash(h),
        }
    }

    fn eval_identifier(&self, name: &str, position: &Position) -> Value {
        if let Some(value) = self.env.borrow().get(name) {
            return value;
        }
        if let Some(builtin) = crate::builtins::lookup(name) {
            return builtin;
        }
        Value::error(format!("unknown identifier: {name}"), position.clone())
    }

    fn eval_prefix(&mut self, p: &crate::ast::expression::PrefixExpression) -> Value {
        let right = self.eval_expression(&p.right).unwrap_ref();
        if right.is_control_signal() {
            return right;
        }
        operators::apply_prefix(p.operator, right, &p.position)
    }

    fn eval_infix(&mut self, i: &crate::ast::expression::InfixExpression) -> Value {
        let left_raw = self.eval_expression(&i.left);
        if left_raw.is_error() {
            return left_raw;
        }

        let right = self.eval_expression(&i.right).unwrap_ref();
        if right.is_control_signal() {
            return right;
        }

        if i.operator == InfixOperator::Assign {
            return match left_raw {
                Value::Ref(r) => {
                    r.set(right);
                    Value::Ref(r)
                }
                _ => Value::error("left side is not assignable", i.position.clone()),
            };
        }

        let left = left_raw.unwrap_ref();
        if left.is_control_signal() {
            return left;
        }
        operators::apply_infix(left, i.operator, right, &i.position)
    }

    fn eval_if(&mut self, node: &crate::ast::expression::IfExpression) -> Value {
        for (condition, consequence) in node.conditions.iter().zip(node.consequences.iter()) {
            let cond = self.eval_expression(condition).unwrap_ref();
            if cond.is_control_signal() {
                return cond;
            }
            if cond.truthy() {
                return self.eval_block(consequence);
            }
        }
        match &node.alternative {
            Some(block) => self.eval_block(block),
            None => Value::Null,
        }
    }

    fn eval_while(&mut self, node: &crate::ast::expression::WhileExpression) -> Value {
        let loop_scope = Environment::enclosed_by(self.env.clone());
        let previous = std::mem::replace(&mut self.env, loop_scope);

        let result = loop {
            let cond = self.eval_expression(&node.condition).unwrap_ref();
            if cond.is_error() {
                break cond;
            }
            if !cond.truthy() {
                break Value::Null;
            }

            let body = self.eval_block(&node.body);
            match body {
                Value::ReturnValue(_) | Value::Error { .. } => break body,
                Value::BreakSignal => break Value::Null,
                Value::ContinueSignal => continue,
                _ => {}
            }
        };

        self.env = previous;
        result
    }

    fn eval_call_expression(&mut self, c: &crate::ast::expression::CallExpression) -> Value {
        let function = self.eval_expression(&c.function).unwrap_ref();
        if function.is_control_signal() {
            return function;
        }

        let mut args = Vec::with_capacity(c.arguments.len());
        for arg in &c.arguments {
            let value = self.eval_expression(arg).unwrap_ref();
            if value.is_control_signal() {
                return value;
            }
            args.push(value);
        }

        self.eval_call(function, args, &c.position)
    }

    fn eval_array(&mut self, a: &crate::ast::expression::ArrayLiteral) -> Value {
        let mut elements = Vec::with_capacity(a.elements.len());
        for el in &a.elements {
            let value = self.eval_expression(el).unwrap_ref();
            if value.is_control_signal() {
                return value;
            }
            elements.push(value);
        }
        Value::new_array(elements, Mutability::Immutable)
    }

    fn eval_index_expression(&mut self, idx: &crate::ast::expression::IndexExpression) -> Value {
        let left = self.eval_expression(&idx.left).unwrap_ref();
        if left.is_control_signal() {
            return left;
        }
        let index = self.eval_expression(&idx.index).unwrap_ref();
        if index.is_control_signal() {
            return index;
        }
        index::eval_index(left, index, &idx.position)
    }

    fn eval_hash(&mut self, h: &crate::ast::expression::HashLiteral) -> Value {
        let mut pairs = Vec::with_capacity(h.pairs.len());
        for (key_expr, value_expr) in &h.pairs {
            let key = self.eval_expression(key_expr).unwrap_ref();
            if key.is_control_signal() {
                return key;
            }
            let Some(hash_key) = key.hash_key() else {
                return Value::error(
                    format!("not hashable: {}", key.type_tag()),
                    h.position.clone(),
                );
            };
            let value = self.eval_expression(value_expr).unwrap_ref();
            if value.is_control_signal() {
                return value;
            }
            pairs.retain(|(k, ..)| *k != hash_key);
            pairs.push((hash_key, key, value));
        }
        Value::new_hash(pairs, Mutability::Immutable)
    }
}
