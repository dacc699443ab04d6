//! Restores human-readable column labels from their stored, escaped form.
//!
//! List column identifiers cannot hold spaces or most punctuation, so labels arrive escaped.
//! [`decode`] understands, in this order:
//!
//! 1. XML name escapes: `_xHHHH_` and `_xHHHHHHHH_`, where `H` is a hex digit of a Unicode code
//!    point (`Due_x0020_Date` becomes `Due Date`).
//! 2. XML character references: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&#NNN;` and
//!    `&#xHHH;`.
//! 3. Percent escapes: `%HH` byte sequences interpreted as UTF-8 (`Due%20Date`).
//!
//! Malformed sequences, and sequences naming something that is not a Unicode scalar value, are
//! kept verbatim. Stages run on the output of the previous stage.

pub fn decode(input: &str) -> String {
	let decoded = decode_name_escapes(input);
	let decoded = decode_char_references(&decoded);

	decode_percent_escapes(&decoded)
}

fn decode_name_escapes(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut rest = input;

	while let Some(pos) = rest.find("_x") {
		out.push_str(&rest[..pos]);

		let tail = &rest[pos + 2..];

		match parse_name_escape(tail) {
			Some((ch, consumed)) => {
				out.push(ch);
				rest = &tail[consumed..];
			},
			None => {
				out.push_str("_x");
				rest = tail;
			},
		}
	}

	out.push_str(rest);

	out
}

/// Parses the `HHHH_` remainder of a name escape and returns the char and bytes consumed.
fn parse_name_escape(tail: &str) -> Option<(char, usize)> {
	for digits in [4, 8] {
		let Some(hex) = tail.get(..digits) else {
			continue;
		};

		if tail.as_bytes().get(digits) != Some(&b'_') || !is_hex(hex) {
			continue;
		}
		if let Some(ch) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
			return Some((ch, digits + 1));
		}
	}

	None
}

fn decode_char_references(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut rest = input;

	while let Some(pos) = rest.find('&') {
		out.push_str(&rest[..pos]);

		let tail = &rest[pos + 1..];
		let resolved = tail
			.find(';')
			.and_then(|end| resolve_reference(&tail[..end]).map(|ch| (ch, end + 1)));

		match resolved {
			Some((ch, consumed)) => {
				out.push(ch);
				rest = &tail[consumed..];
			},
			None => {
				out.push('&');
				rest = tail;
			},
		}
	}

	out.push_str(rest);

	out
}

fn resolve_reference(name: &str) -> Option<char> {
	match name {
		"amp" => Some('&'),
		"lt" => Some('<'),
		"gt" => Some('>'),
		"quot" => Some('"'),
		"apos" => Some('\''),
		_ => {
			let number = name.strip_prefix('#')?;
			let code = match number.strip_prefix(['x', 'X']) {
				Some(hex) if is_hex(hex) => u32::from_str_radix(hex, 16).ok()?,
				Some(_) => return None,
				None if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) =>
					number.parse().ok()?,
				None => return None,
			};

			char::from_u32(code)
		},
	}
}

fn decode_percent_escapes(input: &str) -> String {
	if !input.contains('%') {
		return input.to_string();
	}

	match urlencoding::decode(input) {
		Ok(decoded) => decoded.into_owned(),
		Err(_) => input.to_string(),
	}
}

fn is_hex(s: &str) -> bool {
	!s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}
