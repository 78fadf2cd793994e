use anyhow::{bail, Result};

use crate::list::{MenuList, EMPTY_MESSAGE};
use crate::notifier::Notifier;
use crate::repository::MenuRepository;
use crate::types::{format_price, MenuItem};

pub async fn run(repo: &dyn MenuRepository, notifier: &dyn Notifier, currency: &str, json: bool) -> Result<()> {
    let mut list = MenuList::default();
    if !list.load_items(repo, notifier).await {
        bail!("menu not listed");
    }
    if json {
        println!("{}", serde_json::to_string_pretty(list.items())?);
    } else {
        print!("{}", render_table(list.items(), currency));
    }
    Ok(())
}

/// Plain aligned columns: id, name, price, description.
pub fn render_table(items: &[MenuItem], currency: &str) -> String {
    if items.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }
    let rows: Vec<[String; 4]> = items
        .iter()
        .map(|i| [i.id.to_string(), i.name.clone(), format_price(currency, i.price), i.description.clone()])
        .collect();

    let header = ["ID", "NAME", "PRICE", "DESCRIPTION"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 4]| {
        let row = format!(
            "{:>w0$}  {:<w1$}  {:>w2$}  {}",
            cells[0],
            cells[1],
            cells[2],
            cells[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
        format!("{}\n", row.trim_end())
    };

    let mut out = line(header);
    for row in &rows {
        out += &line([&row[0], &row[1], &row[2], &row[3]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_menu_prints_the_empty_message() {
        assert_eq!(render_table(&[], "R$"), "No items registered.\n");
    }

    #[test]
    fn columns_line_up() {
        let items = vec![
            MenuItem { id: 7, name: "Pizza".into(), description: "Cheese".into(), price: 48.5 },
            MenuItem { id: 12, name: "Soda".into(), description: String::new(), price: 3.5 },
        ];
        let table = render_table(&items, "R$");
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "ID  NAME      PRICE  DESCRIPTION");
        assert_eq!(lines[1], " 7  Pizza  R$ 48.50  Cheese");
        assert_eq!(lines[2], "12  Soda    R$ 3.50");
    }
}
