use bitflags::bitflags;

bitflags! {
    /// Options handed to a compiler backend with every compile request.
    ///
    /// A host fixes its flags at construction; the default is an in-memory
    /// compile with no executable output, no debug information, and warnings
    /// not promoted to errors.
    ///
    /// ```
    /// use scripthost_core::CompilerFlags;
    ///
    /// let flags = CompilerFlags::default();
    /// assert!(flags.contains(CompilerFlags::GENERATE_IN_MEMORY));
    /// assert!(!flags.contains(CompilerFlags::GENERATE_EXECUTABLE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CompilerFlags: u8 {
        /// Produce a standalone executable instead of a library-like unit.
        const GENERATE_EXECUTABLE = 1 << 0;
        /// Keep the compiled unit in memory rather than writing it out.
        const GENERATE_IN_MEMORY = 1 << 1;
        /// Keep information that maps the unit back to the written source.
        const INCLUDE_DEBUG_INFO = 1 << 2;
        /// Report warnings as errors.
        const WARNINGS_AS_ERRORS = 1 << 3;
    }
}

impl Default for CompilerFlags {
    fn default() -> Self {
        CompilerFlags::GENERATE_IN_MEMORY
    }
}
