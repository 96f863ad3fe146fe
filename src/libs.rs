//! Library list formatting for property-list descriptors.

use crate::constants::JAR_SUFFIX;
use crate::line_ending::LineEnding;

/// Name of the archive holding the project's own classes, e.g. `foo.jar`.
pub fn jar_name(project_name: &str) -> String {
    format!("{}{}", project_name.to_lowercase(), JAR_SUFFIX)
}

/// Builds the `<array>` fragment listing the JARs a project needs.
///
/// The project's own archive comes first when it has compiled classes,
/// followed by every external library in the given order.
///
/// ```
/// use woformat::{libs::lib_string, line_ending::LineEnding};
///
/// let libs = lib_string("Foo", true, ["a.jar"], LineEnding::Lf);
/// assert_eq!(
///     libs,
///     "<array>\n\t\t<string>foo.jar</string>\n\t\t<string>a.jar</string>\n\t</array>"
/// );
/// ```
pub fn lib_string<I, S>(
    project_name: &str,
    has_classes: bool,
    ext_libs: I,
    line_ending: LineEnding,
) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let eol = line_ending.as_str();
    let mut buf = String::from("<array>");

    if has_classes {
        push_entry(&mut buf, eol, &jar_name(project_name));
    }
    for lib in ext_libs {
        push_entry(&mut buf, eol, lib.as_ref());
    }

    buf.push_str(eol);
    buf.push_str("\t</array>");
    buf
}

fn push_entry(buf: &mut String, eol: &str, lib: &str) {
    buf.push_str(eol);
    buf.push_str("\t\t<string>");
    buf.push_str(lib);
    buf.push_str("</string>");
}
