use std::rc::Rc;

use crate::environment::Environment;
use crate::token::Position;
use crate::value::{CallFrame, Function, Value};

use super::Evaluator;

impl Evaluator {
    /// §4.3 Call: evaluate callee then args left-to-right (short-circuit on
    /// Error), push an activation record, dispatch, pop it back off.
    pub(super) fn eval_call(
        &mut self,
        function: Value,
        args: Vec<Value>,
        position: &Position,
    ) -> Value {
        let frame = CallFrame {
            position: position.clone(),
            callee: function.inspect(),
            args: args.iter().map(|a| a.inspect()).collect(),
        };
        self.call_stack.push(frame);
        let result = match &function {
            Value::Function(f) => self.call_function(f.clone(), args, position),
            Value::Builtin(_, native) => native(self, position, args),
            other => Value::error(
                format!("not a function: {}", other.type_tag()),
                position.clone(),
            ),
        };
        self.call_stack.pop();
        self.attach_stack(result)
    }

    fn call_function(&mut self, function: Rc<Function>, args: Vec<Value>, position: &Position) -> Value {
        if function.params.len() != args.len() {
            return Value::error(
                format!(
                    "wrong number of arguments: expected {}, got {}",
                    function.params.len(),
                    args.len()
                ),
                position.clone(),
            );
        }

        let call_env = Environment::enclosed_by(function.env.clone());
        for (name, arg) in function.params.iter().zip(args) {
            call_env.borrow_mut().set(name.clone(), arg.unwrap_ref());
        }

        let previous_env = std::mem::replace(&mut self.env, call_env);
        let result = self.eval_block(&function.body);
        self.env = previous_env;

        match result {
            Value::ReturnValue(v) => *v,
            Value::BreakSignal => {
                Value::error("cannot break outside a loop", position.clone())
            }
            Value::ContinueSignal => {
                Value::error("cannot continue outside a loop", position.clone())
            }
            other => other,
        }
    }

    /// Copies the live call stack into an `Error` the moment it's produced,
    /// so later propagation doesn't need to thread the stack through.
    fn attach_stack(&self, value: Value) -> Value {
        match value {
            Value::Error {
                message,
                position,
                stack,
            } if stack.is_empty() => Value::Error {
                message,
                position,
                stack: self.call_stack.clone(),
            },
            other => other,
        }
    }
}
