/*!
# HTMLUglify: Short Codes.

Short codes are generated from a simple counter using a (salted) bijective
base-26 numeration. The alphabet is lowercase ASCII only so every code is a
valid identifier in both HTML and CSS, no escaping required.
*/



/// # Alphabet.
const ALPHABET: [u8; 26] = *b"abcdefghijklmnopqrstuvwxyz";

/// # Alphabet Size.
const BASE: usize = ALPHABET.len();



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Identifier Codec.
///
/// This turns a counter into a short, salt-dependent code. The mapping is
/// injective for any given salt; different salts shuffle the alphabet
/// differently and so (generally) produce different sequences.
pub struct Codec {
	/// # Shuffled Alphabet.
	alphabet: [u8; 26],
}

impl Default for Codec {
	#[inline]
	fn default() -> Self { Self::new(crate::DEFAULT_SALT) }
}

impl Codec {
	#[must_use]
	/// # New.
	///
	/// Shuffle the alphabet according to `salt`. An empty salt leaves it in
	/// its natural order.
	pub fn new(salt: &str) -> Self {
		let mut alphabet = ALPHABET;
		shuffle(&mut alphabet, salt.as_bytes());
		Self { alphabet }
	}

	#[must_use]
	/// # Encode.
	///
	/// Return the code for `counter`.
	///
	/// Single letters cover the first 26 values, two letters the next 676,
	/// and so on; no two counters ever share a code.
	pub fn encode(&self, counter: usize) -> String {
		let mut out = Vec::with_capacity(4);
		let mut n = counter;
		loop {
			out.push(self.alphabet[n % BASE]);
			n /= BASE;
			if n == 0 { break; }
			n -= 1;
		}

		out.reverse();
		out.into_iter().map(char::from).collect()
	}
}



/// # Consistent Shuffle.
///
/// Walk the set from the end, swapping each position with one derived from
/// the salt. The same salt always produces the same order.
fn shuffle(set: &mut [u8], salt: &[u8]) {
	if salt.is_empty() { return; }

	let mut v = 0;
	let mut p = 0;
	for i in (1..set.len()).rev() {
		v %= salt.len();
		let n = usize::from(salt[v]);
		p += n;
		let j = (n + v + p) % i;
		set.swap(i, j);
		v += 1;
	}
}



#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn t_unsalted() {
		let codec = Codec::new("");
		assert_eq!(codec.encode(0), "a");
		assert_eq!(codec.encode(1), "b");
		assert_eq!(codec.encode(25), "z");
		assert_eq!(codec.encode(26), "aa");
		assert_eq!(codec.encode(27), "ab");
		assert_eq!(codec.encode(51), "az");
		assert_eq!(codec.encode(52), "ba");
		assert_eq!(codec.encode(701), "zz");
		assert_eq!(codec.encode(702), "aaa");
	}

	#[test]
	fn t_injective() {
		let codec = Codec::default();
		let mut seen = HashSet::new();
		for i in 0..5_000 {
			let code = codec.encode(i);
			assert!(! code.is_empty());
			assert!(code.bytes().all(|b| b.is_ascii_lowercase()));
			assert!(seen.insert(code), "Duplicate code for {i}.");
		}
	}

	#[test]
	fn t_salted() {
		// The salt only reorders the alphabet.
		let codec = Codec::new("use the force harry");
		let mut set = codec.alphabet;
		set.sort_unstable();
		assert_eq!(set, ALPHABET);

		// Deterministic.
		assert_eq!(codec, Codec::new("use the force harry"));
		assert_eq!(codec, Codec::default());

		// Different salt, different sequence.
		let other = Codec::new("other");
		assert_ne!(
			(0..26).map(|i| codec.encode(i)).collect::<Vec<_>>(),
			(0..26).map(|i| other.encode(i)).collect::<Vec<_>>(),
		);
	}
}
