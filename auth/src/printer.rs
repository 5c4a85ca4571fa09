/*++

Licensed under the Apache-2.0 license.

File Name:

    printer.rs

Abstract:

    File contains support routines and macros to print authentication
    diagnostics to the platform console.

--*/
use core::convert::Infallible;
use ufmt::{uDisplay, uWrite};

#[cfg(all(feature = "console", not(feature = "std")))]
extern "C" {
    /// Provided by the platform: writes `len` bytes at `ptr` to the boot console.
    fn cot_console_write(ptr: *const u8, len: usize);
}

#[derive(Default)]
pub struct Printer;

impl uWrite for Printer {
    type Error = Infallible;

    /// Writes a string slice into this writer, returning whether the write succeeded.
    #[cfg(not(feature = "std"))]
    #[inline(never)]
    fn write_str(&mut self, _str: &str) -> Result<(), Self::Error> {
        #[cfg(feature = "console")]
        unsafe {
            cot_console_write(_str.as_ptr(), _str.len());
        }
        Ok(())
    }

    /// Writes a string slice into this writer, returning whether the write succeeded.
    #[cfg(feature = "std")]
    fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
        print!("{str}");
        Ok(())
    }
}

#[macro_export]
macro_rules! cprint {
    ($($tt:tt)*) => {{
        let _ = ufmt::uwrite!(&mut $crate::printer::Printer::default(), $($tt)*);
    }}
}

#[macro_export]
macro_rules! cprintln {
    ($($tt:tt)*) => {{
        let _ = ufmt::uwriteln!(&mut $crate::printer::Printer::default(), $($tt)*);
    }}
}

fn write_nibbles<W>(f: &mut ufmt::Formatter<'_, W>, x: u8) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    for c in [x >> 4, x & 0xf] {
        if c < 10 {
            f.write_char((c + b'0') as char)?;
        } else {
            f.write_char((c - 10 + b'A') as char)?;
        }
    }
    Ok(())
}

/// Upper-case hex rendering of a byte string
pub struct HexBytes<'a>(pub &'a [u8]);

impl uDisplay for HexBytes<'_> {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        for &x in self.0.iter() {
            write_nibbles(f, x)?;
        }
        Ok(())
    }
}

/// Zero padded eight digit hex rendering of a word, used for error codes
pub struct HexWord(pub u32);

impl uDisplay for HexWord {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str("0x")?;
        for x in self.0.to_be_bytes() {
            write_nibbles(f, x)?;
        }
        Ok(())
    }
}
