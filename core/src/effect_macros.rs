//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants from
//! reducers and environment helpers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use listkeeper_core::async_effect;
///
/// async_effect! {
///     let lists = store.lists_for_user(&user_id).await;
///     match lists {
///         Ok(lists) => Some(ListsAction::ListsLoaded { lists }),
///         Err(error) => Some(ListsAction::RequestFailed {
///             context: "fetch_lists",
///             list_id: None,
///             message: error.to_string(),
///         }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use listkeeper_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(30),
///     action: ListsAction::ClearError
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        AsyncResult { value: i32 },
        TimeoutExpired,
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            // Simulate async work
            Some(TestAction::AsyncResult { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_delay_macro() {
        let effect = delay! {
            duration: Duration::from_secs(30),
            action: TestAction::TimeoutExpired
        };

        assert!(matches!(effect, Effect::Delay { .. }));
    }
}
