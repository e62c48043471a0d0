// Logging shims so call sites stay the same whether or not the `tracing`
// feature is enabled.

/// Borrows every field value and format argument of a logging call without
/// using them.
#[cfg_attr(feature = "tracing", allow(unused_macros))]
macro_rules! discard_log_args {
    () => {};
    ( $msg:literal $( , $fmt_arg:expr )* $(,)? ) => {
        $( let _ = &$fmt_arg; )*
    };
    ( $field:ident = % $value:expr $( , $( $rest:tt )* )? ) => {
        let _ = &$value;
        discard_log_args!( $( $( $rest )* )? );
    };
    ( $field:ident = ? $value:expr $( , $( $rest:tt )* )? ) => {
        let _ = &$value;
        discard_log_args!( $( $( $rest )* )? );
    };
    ( $field:ident = $value:expr $( , $( $rest:tt )* )? ) => {
        let _ = &$value;
        discard_log_args!( $( $( $rest )* )? );
    };
    ( % $value:ident $( , $( $rest:tt )* )? ) => {
        let _ = &$value;
        discard_log_args!( $( $( $rest )* )? );
    };
    ( ? $value:ident $( , $( $rest:tt )* )? ) => {
        let _ = &$value;
        discard_log_args!( $( $( $rest )* )? );
    };
    ( $value:ident $( , $( $rest:tt )* )? ) => {
        let _ = &$value;
        discard_log_args!( $( $( $rest )* )? );
    };
}

macro_rules! log_warn {
    ( $( $arg:tt )* ) => {{
        #[cfg(feature = "tracing")]
        {
            ::tracing::warn!( $( $arg )* );
        }

        #[cfg(not(feature = "tracing"))]
        {
            discard_log_args!( $( $arg )* );
        }
    }};
}

macro_rules! log_error {
    ( $( $arg:tt )* ) => {{
        #[cfg(feature = "tracing")]
        {
            ::tracing::error!( $( $arg )* );
        }

        #[cfg(not(feature = "tracing"))]
        {
            discard_log_args!( $( $arg )* );
        }
    }};
}

macro_rules! log_debug {
    ( $( $arg:tt )* ) => {{
        #[cfg(feature = "tracing")]
        {
            ::tracing::debug!( $( $arg )* );
        }

        #[cfg(not(feature = "tracing"))]
        {
            discard_log_args!( $( $arg )* );
        }
    }};
}

macro_rules! log_trace {
    ( $( $arg:tt )* ) => {{
        #[cfg(feature = "tracing")]
        {
            ::tracing::trace!( $( $arg )* );
        }

        #[cfg(not(feature = "tracing"))]
        {
            discard_log_args!( $( $arg )* );
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn discards_every_field_form() {
        let line = String::from("256,192,1000,1,0");
        let section = 3_u8;
        let error = "invalid hit object type";

        discard_log_args!(
            ?section,
            line,
            len = line.len(),
            error = %error,
            kind = ?section,
            "Failed to parse {} in {}",
            line,
            section,
        );

        discard_log_args!("message only");

        assert_eq!(line, "256,192,1000,1,0");
    }

    #[test]
    fn logging_keeps_values_usable() {
        let state = (300_u32, 2_u32);

        log_trace!(n300 = state.0, misses = state.1, "state");
        log_warn!(?state, "state");

        assert_eq!(state, (300, 2));
    }
}
