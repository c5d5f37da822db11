// Shims over `tracing`, compiled to nothing without the `tracing` feature.

#[doc(hidden)]
#[macro_export]
macro_rules! __dyn_instrument_internal {
    ($span:ident; $fut:expr, $($element:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            $crate::tracing::Instrument::instrument($fut, $crate::tracing::$span!($($element)*))
        }
        #[cfg(not(feature = "tracing"))]
        {
            $fut
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dyn_instrument_trace {
    ($fut:expr, $($element:tt)*) => {
        $crate::__dyn_instrument_internal!(trace_span; $fut, $($element)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dyn_instrument_debug {
    ($fut:expr, $($element:tt)*) => {
        $crate::__dyn_instrument_internal!(debug_span; $fut, $($element)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dyn_trace_internal {
    ($level:ident; $($element:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            $crate::tracing::$level!($($element)*);
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dyn_trace {
    ($($element:tt)*) => {
        $crate::__dyn_trace_internal!(trace; $($element)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dyn_trace_debug {
    ($($element:tt)*) => {
        $crate::__dyn_trace_internal!(debug; $($element)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __dyn_trace_warn {
    ($($element:tt)*) => {
        $crate::__dyn_trace_internal!(warn; $($element)*)
    };
}
