/// The subset of surrounding-grammar context that changes how a construct
/// parses or whether it is even legal: `return` only inside a function body,
/// `await`/`yield` only inside (resp.) an async/generator boundary, `break`
/// with no label only inside a loop or `switch`, and so on. Pushed and
/// popped around function bodies, loop bodies, and `switch` bodies so each
/// nested scope restores its enclosing scope's context on exit.
#[derive(Debug, Clone)]
pub struct ParserState {
    pub strict: bool,
    pub module: bool,
    pub in_function: bool,
    pub in_generator: bool,
    pub in_async: bool,
    pub in_iteration: bool,
    pub in_switch: bool,
    pub allow_in: bool,
    /// Labels reachable from the current position, with whether each one
    /// labels an iteration statement (`continue label;` requires that).
    pub labels: Vec<(Box<str>, bool)>,
}

impl ParserState {
    pub fn new(module: bool) -> Self {
        Self {
            strict: module,
            module,
            in_function: false,
            in_generator: false,
            in_async: module,
            in_iteration: false,
            in_switch: false,
            allow_in: true,
            labels: Vec::new(),
        }
    }

    /// The state a nested function body starts from: it keeps `strict`
    /// (strictness can only be added, never removed, by nesting) and
    /// `module`, but resets every other flag to the function's own.
    pub fn enter_function(&self, generator: bool, is_async: bool) -> Self {
        Self {
            strict: self.strict,
            module: self.module,
            in_function: true,
            in_generator: generator,
            in_async: is_async,
            in_iteration: false,
            in_switch: false,
            allow_in: true,
            labels: Vec::new(),
        }
    }

    /// The state an arrow function body starts from. Unlike an ordinary
    /// function, an arrow is not its own `Yield`/`Await` boundary for
    /// `yield` — only for `await`, since `is_async` is the arrow's own —
    /// so `in_generator` is inherited rather than reset. `in_function`
    /// still becomes `true`: arrows have their own `return` completion.
    pub fn enter_arrow(&self, is_async: bool) -> Self {
        Self {
            strict: self.strict,
            module: self.module,
            in_function: true,
            in_generator: self.in_generator,
            in_async: is_async,
            in_iteration: false,
            in_switch: false,
            allow_in: true,
            labels: Vec::new(),
        }
    }
}
