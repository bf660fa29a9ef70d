//! Grammar parameters (`[In]`, `[Yield]`, `[Await]`, `[Return]`).

/// The grammar parameters in force at one point of a parse.
///
/// Passed by value; a callee can never change its caller's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Params {
    /// `[+In]`: the `in` operator is a relational operator.
    pub in_allowed: bool,
    /// `[+Yield]`: inside a generator; `yield` is an operator.
    pub yield_allowed: bool,
    /// `[+Await]`: `await` is an operator.
    pub await_allowed: bool,
    /// `[+Return]`: inside a function body; `return` is permitted.
    pub return_allowed: bool,
}

/// One grammar parameter, for guards that test a single flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    In,
    Yield,
    Await,
    Return,
}

impl Params {
    pub fn get(self, param: Param) -> bool {
        match param {
            Param::In => self.in_allowed,
            Param::Yield => self.yield_allowed,
            Param::Await => self.await_allowed,
            Param::Return => self.return_allowed,
        }
    }
}

/// How an item derives its callee's parameters from its caller's.
///
/// `None` passes the caller's value through (`?Param`); `Some(v)` forces it
/// (`+Param` / `~Param`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjust {
    in_allowed: Option<bool>,
    yield_allowed: Option<bool>,
    await_allowed: Option<bool>,
    return_allowed: Option<bool>,
}

impl Adjust {
    /// Pass every parameter through unchanged.
    pub const KEEP: Adjust = Adjust {
        in_allowed: None,
        yield_allowed: None,
        await_allowed: None,
        return_allowed: None,
    };

    /// Clear every parameter.
    pub const RESET: Adjust = Adjust {
        in_allowed: Some(false),
        yield_allowed: Some(false),
        await_allowed: Some(false),
        return_allowed: Some(false),
    };

    pub const fn with_in(self) -> Self {
        Adjust {
            in_allowed: Some(true),
            ..self
        }
    }

    pub const fn without_in(self) -> Self {
        Adjust {
            in_allowed: Some(false),
            ..self
        }
    }

    pub const fn with_yield(self) -> Self {
        Adjust {
            yield_allowed: Some(true),
            ..self
        }
    }

    pub const fn without_yield(self) -> Self {
        Adjust {
            yield_allowed: Some(false),
            ..self
        }
    }

    pub const fn without_await(self) -> Self {
        Adjust {
            await_allowed: Some(false),
            ..self
        }
    }

    pub const fn with_return(self) -> Self {
        Adjust {
            return_allowed: Some(true),
            ..self
        }
    }

    pub const fn without_return(self) -> Self {
        Adjust {
            return_allowed: Some(false),
            ..self
        }
    }

    /// Derive the callee's parameters.
    pub fn apply(self, params: Params) -> Params {
        Params {
            in_allowed: self.in_allowed.unwrap_or(params.in_allowed),
            yield_allowed: self.yield_allowed.unwrap_or(params.yield_allowed),
            await_allowed: self.await_allowed.unwrap_or(params.await_allowed),
            return_allowed: self.return_allowed.unwrap_or(params.return_allowed),
        }
    }
}

impl Default for Adjust {
    fn default() -> Self {
        Adjust::KEEP
    }
}
