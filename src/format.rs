//! AceSerializer wire format, revision 1.
//!
//! This module documents the format as read and written by this library.
//! It contains no code.
//!
//! # Overview
//!
//! A message is a flat run of printable ASCII tokens. It is compatible with
//! the Lua AceSerializer-3.0 library used by World of Warcraft addons, and
//! is meant to travel over channels that mangle control characters and
//! whitespace.
//!
//! ```text
//! ^1 <value>* ^^
//! ```
//!
//! Every token is a `^`, one control character, and a payload running up to
//! the next `^`. The spaces above are for reading only; none appear on the
//! wire.
//!
//! # Control Codes
//!
//! | Code | Meaning | Payload |
//! |------|---------|---------|
//! | `^1` | revision marker, opens the message | none |
//! | `^^` | terminator, closes the message | none |
//! | `^S` | string | escaped text |
//! | `^N` | number | decimal text, `1.#INF` or `-1.#INF` |
//! | `^F` | float mantissa | signed integer |
//! | `^f` | float exponent, always follows `^F` | signed integer |
//! | `^B` | true | none |
//! | `^b` | false | none |
//! | `^Z` | nil | none |
//! | `^T` | table start | none |
//! | `^t` | table end | none |
//!
//! A message may carry any number of values, including none (`^1^^`).
//! Text after `^^` is ignored.
//!
//! # Strings
//!
//! String payloads escape every byte that could break the stream:
//!
//! | Byte | Escape |
//! |------|--------|
//! | `0x1E` | `~z` |
//! | other `0x00..=0x20` | `~` followed by the byte plus 64 |
//! | `^` | `~}` |
//! | `~` | `~\|` |
//! | `0x7F` | `~{` |
//!
//! All other bytes, UTF-8 continuation bytes included, pass through unchanged:
//!
//! ```text
//! "a^b c"  ->  ^Sa~}b~`c
//! ```
//!
//! # Numbers
//!
//! A number is written as plain `^N` text when that text survives rounding to
//! 14 significant digits (`%.14g`). Integers and short decimals like `2.456`
//! do. Everything else travels as an exact pair:
//!
//! ```text
//! 1.1234567890123321  ->  ^F5059599576362793^f-52
//! ```
//!
//! The value is `mantissa * 2^exponent`. The mantissa is the significand
//! scaled to 53 bits. Neither component may be zero; a pair whose natural
//! exponent is zero is written with the mantissa doubled and exponent `-1`.
//!
//! Infinities use the sentinels `^N1.#INF` and `^N-1.#INF`. NaN is written as
//! `^NNaN`.
//!
//! # Tables
//!
//! A table is `^T`, a run of key/value pairs, and `^t`:
//!
//! ```text
//! ["a", "b", "c"]    ->  ^T^N1^Sa^N2^Sb^N3^Sc^t
//! {name = "Ann"}     ->  ^T^Sname^SAnn^t
//! ```
//!
//! Integer keys are written one higher than they are held in memory, so a
//! sequence indexed from 0 appears 1-based on the wire, matching Lua arrays.
//! Keys are integers or strings; a nil key or value is malformed. A nil
//! sequence element is a hole: it is not written, and later elements keep
//! their index.
//!
//! ```text
//! ["x", nil, "z"]    ->  ^T^N1^Sx^N3^Sz^t
//! ```
//!
//! # Transport Noise
//!
//! Before decoding, every character in `0x01..=0x20` and `0x7F` is dropped
//! from the input. Escapes are built from printable characters only, so this
//! never changes a well-formed message.
//!
//! # Example Message
//!
//! ```text
//! ^1^Sa^Sb^Sc^N1^N2^N3^F5059599576362793^f-52^N2.456^B^Z^N2^^
//! ```
//!
//! carries eleven values: three strings, three integers, an exact float, a
//! short float, `true`, nil and `2`.
