//! Shader programs.
//!
//! A [`Shader`] owns one linked program and deletes it on drop. The two
//! stages are compiled, linked and deleted during construction, so only the
//! program outlives it.
//!
//! Failing to compile or link is a programmer error. The plain constructors
//! log the driver output and panic; the `try_*` variants and
//! [`Shader::from_sources`] return a [`ShaderError`] instead.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3, Vec4};
use glow::HasContext;
use thiserror::Error;

/// Errors that can occur while loading, compiling or linking a shader.
#[derive(Debug, Clone, Error)]
pub enum ShaderError {
    /// A source file could not be read.
    #[error("failed to read shader source '{path}': {message}")]
    Io { path: String, message: String },
    /// A shader stage failed to compile.
    #[error("shader compile error ({stage}, {path}):\n{log}")]
    Compile {
        /// The shader stage that failed (e.g. "vertex", "fragment").
        stage: String,
        /// File the source came from, or `<inline>`.
        path: String,
        /// Driver info log with the numbered source.
        log: String,
    },
    /// A program failed to link.
    #[error("shader link error:\n{0}")]
    Link(String),
}

/// Formats a shader compilation error for human-readable debugging.
///
/// Prepends right-aligned line numbers to each line of `source`, then
/// appends the driver's error `log`, so that line references in the log can
/// be matched against the GLSL.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let source_lines: Vec<&str> = source.lines().collect();
    let width = source_lines.len().max(1).to_string().len();

    let numbered: String = source_lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1, width = width))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Vertex and fragment source paths for a shader called `name`.
pub fn shader_paths(name: &str) -> (PathBuf, PathBuf) {
    (
        PathBuf::from(format!("{name}.vs.glsl")),
        PathBuf::from(format!("{name}.fs.glsl")),
    )
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|e| ShaderError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[allow(unsafe_code)]
fn compile_stage(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
    origin: &str,
) -> Result<glow::Shader, ShaderError> {
    let stage_name = match shader_type {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    };
    let compile_error = |log: String| ShaderError::Compile {
        stage: stage_name.to_string(),
        path: origin.to_string(),
        log,
    };

    // SAFETY: glow wraps raw GL calls as unsafe. We pass a valid stage
    // constant and delete the shader on the failure path.
    let shader = unsafe { gl.create_shader(shader_type).map_err(compile_error)? };

    // SAFETY: shader is the live handle created above.
    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    // SAFETY: queries and deletion target the same live handle.
    if unsafe { gl.get_shader_compile_status(shader) } {
        Ok(shader)
    } else {
        let info_log = unsafe { gl.get_shader_info_log(shader) };
        unsafe { gl.delete_shader(shader) };
        Err(compile_error(format_shader_error(source, &info_log)))
    }
}

/// Compiles both stages and links them; the stages are deleted before
/// returning whatever the outcome.
#[allow(unsafe_code)]
fn build_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
    origins: (&str, &str),
) -> Result<glow::Program, ShaderError> {
    let vert = compile_stage(gl, glow::VERTEX_SHADER, vertex_src, origins.0)?;
    let frag = match compile_stage(gl, glow::FRAGMENT_SHADER, fragment_src, origins.1) {
        Ok(f) => f,
        Err(e) => {
            // SAFETY: vert is a valid shader handle from compile_stage.
            unsafe { gl.delete_shader(vert) };
            return Err(e);
        }
    };

    // SAFETY: both stages are valid handles; the program is deleted if
    // linking fails.
    let result = unsafe {
        match gl.create_program() {
            Ok(program) => {
                gl.attach_shader(program, vert);
                gl.attach_shader(program, frag);
                gl.link_program(program);
                gl.detach_shader(program, vert);
                gl.detach_shader(program, frag);

                if gl.get_program_link_status(program) {
                    Ok(program)
                } else {
                    let info_log = gl.get_program_info_log(program);
                    gl.delete_program(program);
                    Err(ShaderError::Link(info_log))
                }
            }
            Err(e) => Err(ShaderError::Link(e)),
        }
    };

    // SAFETY: both stages are detached or never attached; each is deleted once.
    unsafe {
        gl.delete_shader(vert);
        gl.delete_shader(frag);
    }

    result
}

/// A value that can be uploaded to a uniform location.
pub trait Uniform {
    /// Uploads `self` to `location`; a `None` location is a no-op.
    fn upload(&self, gl: &glow::Context, location: Option<&glow::UniformLocation>);
}

#[allow(unsafe_code)]
impl Uniform for i32 {
    fn upload(&self, gl: &glow::Context, location: Option<&glow::UniformLocation>) {
        // SAFETY: the caller made the owning program current.
        unsafe { gl.uniform_1_i32(location, *self) }
    }
}

#[allow(unsafe_code)]
impl Uniform for f32 {
    fn upload(&self, gl: &glow::Context, location: Option<&glow::UniformLocation>) {
        // SAFETY: the caller made the owning program current.
        unsafe { gl.uniform_1_f32(location, *self) }
    }
}

#[allow(unsafe_code)]
impl Uniform for Vec2 {
    fn upload(&self, gl: &glow::Context, location: Option<&glow::UniformLocation>) {
        // SAFETY: the caller made the owning program current.
        unsafe { gl.uniform_2_f32(location, self.x, self.y) }
    }
}

#[allow(unsafe_code)]
impl Uniform for Vec3 {
    fn upload(&self, gl: &glow::Context, location: Option<&glow::UniformLocation>) {
        // SAFETY: the caller made the owning program current.
        unsafe { gl.uniform_3_f32(location, self.x, self.y, self.z) }
    }
}

#[allow(unsafe_code)]
impl Uniform for Vec4 {
    fn upload(&self, gl: &glow::Context, location: Option<&glow::UniformLocation>) {
        // SAFETY: the caller made the owning program current.
        unsafe { gl.uniform_4_f32(location, self.x, self.y, self.z, self.w) }
    }
}

#[allow(unsafe_code)]
impl Uniform for Mat4 {
    fn upload(&self, gl: &glow::Context, location: Option<&glow::UniformLocation>) {
        // SAFETY: the caller made the owning program current.
        unsafe { gl.uniform_matrix_4_f32_slice(location, false, &self.to_cols_array()) }
    }
}

/// An owned, linked shader program.
pub struct Shader {
    gl: Rc<glow::Context>,
    program: glow::Program,
}

impl Shader {
    /// Loads `<name>.vs.glsl` and `<name>.fs.glsl`.
    ///
    /// # Panics
    ///
    /// Panics if either file cannot be read, a stage fails to compile, or
    /// the program fails to link. The driver log is written to the `error`
    /// log first.
    pub fn from_name(gl: &Rc<glow::Context>, name: &str) -> Self {
        let (vs, fs) = shader_paths(name);
        Self::from_files(gl, &vs, &fs)
    }

    /// Loads a vertex and a fragment shader from explicit paths.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Shader::from_name`].
    pub fn from_files(gl: &Rc<glow::Context>, vertex_path: &Path, fragment_path: &Path) -> Self {
        match Self::try_from_files(gl, vertex_path, fragment_path) {
            Ok(shader) => shader,
            Err(e) => {
                log::error!("{e}");
                panic!(
                    "failed to build shader from {} and {}",
                    vertex_path.display(),
                    fragment_path.display()
                );
            }
        }
    }

    pub fn try_from_name(gl: &Rc<glow::Context>, name: &str) -> Result<Self, ShaderError> {
        let (vs, fs) = shader_paths(name);
        Self::try_from_files(gl, &vs, &fs)
    }

    /// # Errors
    ///
    /// Returns `ShaderError::Io` if a file cannot be read, otherwise the
    /// errors of [`Shader::from_sources`].
    pub fn try_from_files(
        gl: &Rc<glow::Context>,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, ShaderError> {
        let vertex_src = read_source(vertex_path)?;
        let fragment_src = read_source(fragment_path)?;
        let program = build_program(
            gl,
            &vertex_src,
            &fragment_src,
            (
                &vertex_path.display().to_string(),
                &fragment_path.display().to_string(),
            ),
        )?;
        log::debug!(
            "linked shader from {} and {}",
            vertex_path.display(),
            fragment_path.display()
        );
        Ok(Self {
            gl: Rc::clone(gl),
            program,
        })
    }

    /// Builds a program from in-memory GLSL.
    ///
    /// # Errors
    ///
    /// Returns `ShaderError::Compile` if either stage fails to compile, or
    /// `ShaderError::Link` if linking fails.
    pub fn from_sources(
        gl: &Rc<glow::Context>,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, ShaderError> {
        let program = build_program(gl, vertex_src, fragment_src, ("<inline>", "<inline>"))?;
        Ok(Self {
            gl: Rc::clone(gl),
            program,
        })
    }

    /// Makes this program current.
    #[allow(unsafe_code)]
    pub fn use_program(&self) {
        // SAFETY: self.program is a live program owned by this Shader.
        unsafe { self.gl.use_program(Some(self.program)) }
    }

    /// Makes the program current and uploads `value` to the uniform `name`.
    ///
    /// The location is looked up on every call. A name the program does not
    /// declare (or that the driver optimized away) is silently ignored.
    #[allow(unsafe_code)]
    pub fn set<U: Uniform>(&self, name: &str, value: U) {
        self.use_program();
        // SAFETY: self.program is a live program owned by this Shader.
        let location = unsafe { self.gl.get_uniform_location(self.program, name) };
        if location.is_none() {
            log::trace!("uniform '{name}' not found, ignoring");
        }
        value.upload(&self.gl, location.as_ref());
    }

    pub fn program(&self) -> glow::Program {
        self.program
    }
}

impl Drop for Shader {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        // SAFETY: the program was created by this Shader and is deleted once.
        unsafe { self.gl.delete_program(self.program) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_shader_error_prepends_line_numbers() {
        let source = "#version 430 core\nvoid main() {\n}\n";
        let log = "ERROR: 0:2: syntax error";
        let formatted = format_shader_error(source, log);

        assert!(formatted.contains("1: #version 430 core"), "got:\n{formatted}");
        assert!(formatted.contains("2: void main() {"), "got:\n{formatted}");
        assert!(formatted.contains("3: }"), "got:\n{formatted}");
        assert!(formatted.ends_with(log), "got:\n{formatted}");
    }

    #[test]
    fn format_shader_error_handles_empty_inputs() {
        assert_eq!(format_shader_error("", "some error"), "some error");
        assert_eq!(format_shader_error("void main() {}", ""), "1: void main() {}");
        assert!(format_shader_error("", "").is_empty());
    }

    #[test]
    fn format_shader_error_right_aligns_line_numbers() {
        let source = (1..=12)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let formatted = format_shader_error(&source, "err");
        let lines: Vec<&str> = formatted.lines().collect();
        assert!(lines[0].starts_with(" 1: "), "got: '{}'", lines[0]);
        assert!(lines[9].starts_with("10: "), "got: '{}'", lines[9]);
    }

    #[test]
    fn shader_paths_use_glsl_suffixes() {
        let (vs, fs) = shader_paths("shaders/batch");
        assert_eq!(vs, PathBuf::from("shaders/batch.vs.glsl"));
        assert_eq!(fs, PathBuf::from("shaders/batch.fs.glsl"));
    }

    #[test]
    fn read_source_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.vs.glsl");
        match read_source(&missing) {
            Err(ShaderError::Io { path, .. }) => assert!(path.contains("missing.vs.glsl")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn compile_error_display_includes_stage_path_and_log() {
        let err = ShaderError::Compile {
            stage: "fragment".into(),
            path: "sprite.fs.glsl".into(),
            log: "undeclared identifier".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(msg.contains("sprite.fs.glsl"), "missing path in: {msg}");
        assert!(msg.contains("undeclared identifier"), "missing log in: {msg}");
    }

    #[test]
    fn link_error_display_includes_log() {
        let err = ShaderError::Link("varying mismatch".into());
        assert!(format!("{err}").contains("varying mismatch"));
    }

    #[test]
    fn uniform_is_implemented_for_all_setter_types() {
        fn assert_uniform<T: Uniform>() {}
        assert_uniform::<i32>();
        assert_uniform::<f32>();
        assert_uniform::<Vec2>();
        assert_uniform::<Vec3>();
        assert_uniform::<Vec4>();
        assert_uniform::<Mat4>();
    }

    #[test]
    #[ignore = "requires GL context"]
    fn from_sources_links_builtin_batch_shader() {
        // Would test: Shader::from_sources(gl, BATCH_VERTEX_SHADER,
        // BATCH_FRAGMENT_SHADER) succeeds.
    }

    #[test]
    #[ignore = "requires GL context"]
    fn set_unknown_uniform_is_a_no_op() {
        // Would test: shader.set("does_not_exist", 1.0f32) leaves no GL error.
    }
}
