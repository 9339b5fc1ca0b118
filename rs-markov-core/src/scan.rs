use std::io::{self, Read};

/// Initial scanner buffer size; doubled whenever a token spans the
/// whole buffer.
const START_BUF_SIZE: usize = 4096;

/// A single split decision made by a [`SplitFn`].
///
/// - `consumed`: how many bytes of the presented window to drop,
///   whether or not a token was produced.
/// - `token`: the extracted token bytes, if a complete token was found.
#[derive(Debug)]
pub struct Split {
	pub consumed: usize,
	pub token: Option<Vec<u8>>,
}

/// A pluggable token splitting strategy.
///
/// Given the unconsumed bytes of a source and a flag indicating whether
/// the source is exhausted, the strategy decides how many bytes to
/// consume and whether a token was completed.
///
/// # Contract
/// - Returning `consumed > 0` with no token means "drop these bytes and
///   show me more" (ex. skipping leading whitespace).
/// - Returning `consumed == 0` with no token means "I need more data";
///   the scanner will read further from the source.
/// - At `at_eof`, a strategy must either emit a final token or return
///   no token, which ends the scan.
///
/// A blanket implementation covers plain closures and functions, so
/// `scan_words` and friends can be passed directly.
pub trait SplitFn {
	fn split(&mut self, data: &[u8], at_eof: bool) -> io::Result<Split>;
}

impl<F> SplitFn for F
where
	F: FnMut(&[u8], bool) -> io::Result<Split>,
{
	fn split(&mut self, data: &[u8], at_eof: bool) -> io::Result<Split> {
		self(data, at_eof)
	}
}

/// Default split strategy: whitespace-separated words.
///
/// Skips leading ASCII whitespace, then emits the run of bytes up to
/// the next whitespace. A trailing partial word is emitted at end of
/// input.
pub fn scan_words(data: &[u8], at_eof: bool) -> io::Result<Split> {
	let mut start = 0;
	while start < data.len() && data[start].is_ascii_whitespace() {
		start += 1;
	}

	for i in start..data.len() {
		if data[i].is_ascii_whitespace() {
			return Ok(Split { consumed: i + 1, token: Some(data[start..i].to_vec()) });
		}
	}

	// No terminating whitespace: only a complete word if the input ends here
	if at_eof && data.len() > start {
		return Ok(Split { consumed: data.len(), token: Some(data[start..].to_vec()) });
	}

	Ok(Split { consumed: start, token: None })
}

/// Alternative split strategy: one token per line.
///
/// Emits bytes up to (excluding) the next `\n`, stripping a trailing
/// `\r`. A final unterminated line is emitted at end of input.
pub fn scan_lines(data: &[u8], at_eof: bool) -> io::Result<Split> {
	if let Some(i) = data.iter().position(|&b| b == b'\n') {
		return Ok(Split { consumed: i + 1, token: Some(strip_cr(&data[..i]).to_vec()) });
	}

	if at_eof && !data.is_empty() {
		return Ok(Split { consumed: data.len(), token: Some(strip_cr(data).to_vec()) });
	}

	Ok(Split { consumed: 0, token: None })
}

fn strip_cr(line: &[u8]) -> &[u8] {
	match line.last() {
		Some(b'\r') => &line[..line.len() - 1],
		_ => line,
	}
}

/// Buffered scanner driving a [`SplitFn`] over a byte source.
///
/// Yields tokens lazily, in order, as an iterator. Read errors from the
/// source and errors from the split function surface as items; after an
/// error the scanner is done.
///
/// # Notes
/// - The buffer is compacted and grown as needed, so tokens larger than
///   the initial buffer are handled.
/// - Token bytes are converted to `String` lossily; invalid UTF-8
///   becomes U+FFFD rather than failing the scan.
pub struct Scanner<R, F> {
	reader: R,
	split: F,
	buf: Vec<u8>,
	start: usize,
	end: usize,
	at_eof: bool,
	done: bool,
}

impl<R: Read, F: SplitFn> Scanner<R, F> {
	/// Creates a scanner over `reader` using `split` as the token policy.
	pub fn new(reader: R, split: F) -> Self {
		Self {
			reader,
			split,
			buf: Vec::new(),
			start: 0,
			end: 0,
			at_eof: false,
			done: false,
		}
	}

	/// Reads more bytes from the source into the buffer, compacting and
	/// growing it first if there is no free space.
	fn fill(&mut self) -> io::Result<()> {
		if self.start > 0 {
			self.buf.copy_within(self.start..self.end, 0);
			self.end -= self.start;
			self.start = 0;
		}
		if self.end == self.buf.len() {
			let new_len = (self.buf.len() * 2).max(START_BUF_SIZE);
			self.buf.resize(new_len, 0);
		}

		loop {
			match self.reader.read(&mut self.buf[self.end..]) {
				Ok(0) => {
					self.at_eof = true;
					return Ok(());
				}
				Ok(n) => {
					self.end += n;
					return Ok(());
				}
				Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
				Err(e) => return Err(e),
			}
		}
	}
}

impl<R: Read, F: SplitFn> Iterator for Scanner<R, F> {
	type Item = io::Result<String>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		loop {
			// Let the split function see what is buffered so far
			if self.end > self.start || self.at_eof {
				let window = &self.buf[self.start..self.end];
				match self.split.split(window, self.at_eof) {
					Ok(Split { consumed, token }) => {
						debug_assert!(consumed <= window.len());
						self.start += consumed.min(window.len());
						if let Some(bytes) = token {
							return Some(Ok(String::from_utf8_lossy(&bytes).into_owned()));
						}
						if self.at_eof {
							self.done = true;
							return None;
						}
						// No token yet: fall through and read more input
					}
					Err(e) => {
						self.done = true;
						return Some(Err(e));
					}
				}
			}

			if let Err(e) = self.fill() {
				self.done = true;
				return Some(Err(e));
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn words(input: &str) -> Vec<String> {
		Scanner::new(input.as_bytes(), scan_words)
			.collect::<io::Result<Vec<_>>>()
			.unwrap()
	}

	#[test]
	fn words_split_on_whitespace() {
		assert_eq!(words("Show your  flowcharts\n\tand tables"),
			vec!["Show", "your", "flowcharts", "and", "tables"]);
	}

	#[test]
	fn trailing_word_emitted_at_eof() {
		assert_eq!(words("no newline at end"), vec!["no", "newline", "at", "end"]);
	}

	#[test]
	fn whitespace_only_input_yields_nothing() {
		assert!(words("  \n\t  ").is_empty());
		assert!(words("").is_empty());
	}

	#[test]
	fn words_span_buffer_refills() {
		// One-byte reads force the scanner to refill between every byte
		struct OneByte<'a>(&'a [u8]);
		impl Read for OneByte<'_> {
			fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
				if self.0.is_empty() {
					return Ok(0);
				}
				buf[0] = self.0[0];
				self.0 = &self.0[1..];
				Ok(1)
			}
		}

		let tokens: Vec<String> = Scanner::new(OneByte(b"alpha beta gamma"), scan_words)
			.collect::<io::Result<Vec<_>>>()
			.unwrap();
		assert_eq!(tokens, vec!["alpha", "beta", "gamma"]);
	}

	#[test]
	fn lines_strip_carriage_return() {
		let tokens: Vec<String> = Scanner::new("one\r\ntwo\nthree".as_bytes(), scan_lines)
			.collect::<io::Result<Vec<_>>>()
			.unwrap();
		assert_eq!(tokens, vec!["one", "two", "three"]);
	}

	#[test]
	fn read_error_is_surfaced() {
		struct Failing;
		impl Read for Failing {
			fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
				Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken"))
			}
		}

		let mut scanner = Scanner::new(Failing, scan_words);
		assert!(scanner.next().unwrap().is_err());
		assert!(scanner.next().is_none());
	}
}
