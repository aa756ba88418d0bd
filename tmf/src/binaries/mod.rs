use std::io::{self, Read, Write};

/// Fixed-size structures that are stored in files exactly as they sit in memory.
pub trait BinaryData: Sized {
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self>;

    fn write<W: Write>(&self, buffer: &mut W) -> io::Result<()>;
}

impl<T: bytemuck::Pod> BinaryData for T {
    fn read<R: Read>(buffer: &mut R) -> io::Result<Self> {
        let mut value = T::zeroed();
        buffer.read_exact(bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }

    fn write<W: Write>(&self, buffer: &mut W) -> io::Result<()> {
        buffer.write_all(bytemuck::bytes_of(self))
    }
}
