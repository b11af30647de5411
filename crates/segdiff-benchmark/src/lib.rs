//! Shared inputs of the benchmarks.

/// A few paragraphs of article-like wikitext.
pub static ARTICLE: &str = "\
'''Apples''' are the fruit of the apple tree. The tree originated in [[Central Asia]], \
where its wild ancestor is still found today. Apples have been grown for thousands of years \
in Asia and Europe.<ref>Cornille, 2014.</ref>

There are more than 7,500 known cultivars of apples. Different cultivars are bred for \
various tastes and uses, including cooking, eating raw and cider production. Trees and \
fruit are prone to a number of fungal, bacterial and pest problems.

{{Infobox fruit | name = Apple | color = red }}
In 2010, the fruit's genome was sequenced as part of research on disease control and \
selective breeding in apple production. Worldwide production of apples in 2021 was 93 \
million tonnes, with China accounting for nearly half of the total.

Apples are eaten raw, baked or cooked. Is that all? No! They are also dried, juiced \
and fermented.
";

/// `ARTICLE` with its second and third paragraphs swapped and a sentence
/// edited.
pub fn revised_article() -> String {
    let paragraphs: Vec<&str> = ARTICLE.split("\n\n").collect();
    let mut revised = vec![paragraphs[0], paragraphs[2], paragraphs[1]];
    revised.extend_from_slice(&paragraphs[3..]);
    revised.join("\n\n").replace("Is that all?", "Is that really all?")
}

/// `text` repeated `times` times, separated by paragraph breaks.
pub fn repeated(text: &str, times: usize) -> String {
    vec![text.trim_end(); times].join("\n\n")
}
